//! Handover scenario integration tests
//!
//! Drives the engine with decoded measurement reports and verifies the
//! resulting decisions and fired handovers end to end.

use mobctl_common::{CellId, QualitySample, TerminalId};
use mobctl_engine::{HandoverDecision, MobilityConfig, NeighbourFilter};
use mobctl_tests::{flagged_empty_report, init_test_logging, measurement_report, EngineHarness};

const TERMINAL: TerminalId = TerminalId::new(57);
const SERVING: CellId = CellId::new(1);
const NEIGHBOUR: CellId = CellId::new(2);

/// A weakly served terminal with a strong, well-regarded neighbour is
/// handed over to that neighbour.
#[test]
fn test_weak_serving_cell_hands_over_to_strong_neighbour() {
    init_test_logging();

    let mut h = EngineHarness::default();
    h.engine.set_serving_cell(TERMINAL, SERVING);
    h.provider
        .set_cell_quality(NEIGHBOUR, QualitySample::new(4.5, 0.9));
    h.advance_past_warmup();

    let decision = h
        .engine
        .report_measurement(&measurement_report(TERMINAL, 10, &[(2, 30)]));

    assert_eq!(
        decision,
        HandoverDecision::Handover {
            target_cell: NEIGHBOUR
        }
    );
    assert_eq!(h.trigger.fired(), vec![(TERMINAL, NEIGHBOUR)]);
}

/// A terminal whose own experience is already good is never disturbed,
/// even by a clearly better neighbour.
#[test]
fn test_satisfied_terminal_keeps_its_serving_cell() {
    init_test_logging();

    let mut h = EngineHarness::default();
    h.engine.set_serving_cell(TERMINAL, SERVING);
    h.provider
        .set_terminal_quality(TERMINAL, QualitySample::new(4.0, 0.5));
    h.provider
        .set_cell_quality(NEIGHBOUR, QualitySample::new(4.5, 0.9));
    h.advance_past_warmup();

    let decision = h
        .engine
        .report_measurement(&measurement_report(TERMINAL, 10, &[(2, 30)]));

    assert_eq!(decision, HandoverDecision::NoHandover);
    assert!(h.trigger.fired().is_empty());
}

/// With no registered neighbours the serving cell is the only candidate,
/// so no handover is possible.
#[test]
fn test_terminal_without_neighbours_never_moves() {
    init_test_logging();

    let mut h = EngineHarness::default();
    h.engine.set_serving_cell(TERMINAL, SERVING);
    h.advance_past_warmup();

    let decision = h
        .engine
        .report_measurement(&flagged_empty_report(TERMINAL, 34));

    assert_eq!(decision, HandoverDecision::NoHandover);
    assert!(h.trigger.fired().is_empty());
    assert!(h.engine.store().is_empty());
}

/// No decision is taken before the warm-up delay, but the measurements
/// are retained and acted on afterwards.
#[test]
fn test_no_decisions_during_warmup() {
    init_test_logging();

    let mut h = EngineHarness::default();
    h.engine.set_serving_cell(TERMINAL, SERVING);
    h.provider
        .set_cell_quality(NEIGHBOUR, QualitySample::new(4.5, 0.9));

    let report = measurement_report(TERMINAL, 10, &[(2, 30)]);
    let decision = h.engine.report_measurement(&report);
    assert_eq!(decision, HandoverDecision::NoHandover);
    assert!(h.trigger.fired().is_empty());

    h.advance_past_warmup();
    let decision = h.engine.report_measurement(&report);
    assert!(decision.is_handover());
    assert_eq!(h.trigger.fired().len(), 1);
}

/// A winning candidate must strictly exceed the absolute score floor.
#[test]
fn test_score_floor_gates_marginal_candidates() {
    init_test_logging();

    let mut h = EngineHarness::default();
    h.engine.set_serving_cell(TERMINAL, SERVING);
    h.advance_past_warmup();

    // 25 * 0.2 lands exactly on the default floor of 5.0.
    let decision = h
        .engine
        .report_measurement(&measurement_report(TERMINAL, 5, &[(2, 25)]));
    assert_eq!(decision, HandoverDecision::NoHandover);

    // 26 * 0.2 = 5.2 clears it.
    let decision = h
        .engine
        .report_measurement(&measurement_report(TERMINAL, 5, &[(2, 26)]));
    assert!(decision.is_handover());
    assert_eq!(h.trigger.fired(), vec![(TERMINAL, NEIGHBOUR)]);
}

/// Equal scores resolve to the first candidate in construction order:
/// neighbours in ascending cell-id order, serving cell last.
#[test]
fn test_tie_break_is_deterministic() {
    init_test_logging();

    let mut h = EngineHarness::default();
    h.engine.set_serving_cell(TERMINAL, SERVING);
    h.advance_past_warmup();

    // Two neighbours with identical scores: the lower cell id wins.
    let decision = h
        .engine
        .report_measurement(&measurement_report(TERMINAL, 5, &[(9, 30), (4, 30)]));
    assert_eq!(
        decision,
        HandoverDecision::Handover {
            target_cell: CellId::new(4)
        }
    );

    // A neighbour that merely ties the serving score still wins the tie.
    let mut h = EngineHarness::default();
    h.engine.set_serving_cell(TERMINAL, SERVING);
    h.advance_past_warmup();
    let decision = h
        .engine
        .report_measurement(&measurement_report(TERMINAL, 30, &[(2, 30)]));
    assert_eq!(
        decision,
        HandoverDecision::Handover {
            target_cell: NEIGHBOUR
        }
    );
}

/// With a configured margin the winner must clear the serving score by at
/// least that amount.
#[test]
fn test_handover_margin_requires_clear_winner() {
    init_test_logging();

    let config = MobilityConfig {
        handover_margin: 2.0,
        ..Default::default()
    };
    let mut h = EngineHarness::new(config);
    h.engine.set_serving_cell(TERMINAL, SERVING);
    h.advance_past_warmup();

    // Neighbour 6.0 vs serving 4.6: a 1.4 lead is inside the margin.
    let decision = h
        .engine
        .report_measurement(&measurement_report(TERMINAL, 23, &[(2, 30)]));
    assert_eq!(decision, HandoverDecision::NoHandover);

    // Neighbour 6.0 vs serving 3.4: a 2.6 lead clears it.
    let decision = h
        .engine
        .report_measurement(&measurement_report(TERMINAL, 17, &[(2, 30)]));
    assert!(decision.is_handover());
}

struct OnlyCell(CellId);

impl NeighbourFilter for OnlyCell {
    fn is_valid_neighbour(&self, cell_id: CellId) -> bool {
        cell_id == self.0
    }
}

/// The admission filter removes candidates before scoring.
#[test]
fn test_admission_filter_excludes_candidates() {
    init_test_logging();

    let mut h = EngineHarness::with_filter(
        MobilityConfig::default(),
        Box::new(OnlyCell(CellId::new(3))),
    );
    h.engine.set_serving_cell(TERMINAL, SERVING);
    h.advance_past_warmup();

    // Cell 2 outscores cell 3 but is not admitted.
    let decision = h
        .engine
        .report_measurement(&measurement_report(TERMINAL, 5, &[(2, 34), (3, 28)]));
    assert_eq!(
        decision,
        HandoverDecision::Handover {
            target_cell: CellId::new(3)
        }
    );
}

/// Terminals are tracked and evaluated independently of each other.
#[test]
fn test_terminals_are_evaluated_independently() {
    init_test_logging();

    let restless = TerminalId::new(1);
    let content = TerminalId::new(2);

    let mut h = EngineHarness::default();
    h.engine.set_serving_cell(restless, SERVING);
    h.engine.set_serving_cell(content, SERVING);
    h.provider
        .set_terminal_quality(content, QualitySample::new(4.5, 0.9));
    h.advance_past_warmup();

    let moved = h
        .engine
        .report_measurement(&measurement_report(restless, 8, &[(2, 30)]));
    let stayed = h
        .engine
        .report_measurement(&measurement_report(content, 8, &[(2, 30)]));

    assert!(moved.is_handover());
    assert_eq!(stayed, HandoverDecision::NoHandover);
    assert_eq!(h.trigger.fired(), vec![(restless, NEIGHBOUR)]);
    assert_eq!(h.engine.store().terminal_count(), 2);
}

/// Later measurements overwrite earlier ones for the same neighbour.
#[test]
fn test_repeated_reports_overwrite_measurements() {
    init_test_logging();

    let mut h = EngineHarness::default();
    h.engine.set_serving_cell(TERMINAL, SERVING);
    h.advance_past_warmup();

    let decision = h
        .engine
        .report_measurement(&measurement_report(TERMINAL, 10, &[(2, 30)]));
    assert!(decision.is_handover());

    // The neighbour has faded; the stored measurement follows it down and
    // the serving cell now wins.
    let decision = h
        .engine
        .report_measurement(&measurement_report(TERMINAL, 28, &[(2, 12)]));
    assert_eq!(decision, HandoverDecision::NoHandover);
    assert_eq!(h.trigger.fired().len(), 1);
    assert_eq!(h.engine.store().neighbour_count(TERMINAL), 1);
}

/// Releasing a terminal clears its measurements and association; the
/// engine starts from scratch on the next report.
#[test]
fn test_released_terminal_forgets_all_state() {
    init_test_logging();

    let mut h = EngineHarness::default();
    h.engine.set_serving_cell(TERMINAL, SERVING);
    h.advance_past_warmup();
    h.engine
        .report_measurement(&measurement_report(TERMINAL, 10, &[(2, 30)]));
    assert_eq!(h.trigger.fired().len(), 1);

    assert!(h.engine.remove_terminal(TERMINAL));
    assert!(h.engine.store().is_empty());

    // Without an association the next report is stored but never
    // evaluated.
    let decision = h
        .engine
        .report_measurement(&measurement_report(TERMINAL, 10, &[(2, 30)]));
    assert_eq!(decision, HandoverDecision::NoHandover);
    assert_eq!(h.trigger.fired().len(), 1);
}
