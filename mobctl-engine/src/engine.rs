//! Mobility Engine
//!
//! Front door of the decision core: ingests decoded measurement reports,
//! maintains the per-terminal neighbour table and serving-cell
//! associations, runs the [`DecisionEvaluator`] and forwards fired
//! decisions to the [`HandoverTrigger`] sink.
//!
//! Reports for one terminal are processed to completion before the next,
//! so the ingest-then-evaluate sequence is atomic from the caller's view.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use mobctl_common::{CellId, Rsrq, TerminalId, TimeSource};
use tracing::{debug, warn};

use crate::config::MobilityConfig;
use crate::evaluator::{DecisionEvaluator, HandoverDecision};
use crate::filter::NeighbourFilter;
use crate::provider::QualitySampleProvider;
use crate::store::MeasurementStore;

/// One decoded neighbour entry of a measurement report.
///
/// The RSRQ result is optional at this boundary because the radio layer
/// decodes it from an optional field; a report that claims neighbour
/// measurements must carry it for every listed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasuredNeighbour {
    /// The measured neighbour cell
    pub cell_id: CellId,
    /// Quantized radio quality towards that cell, if decoded
    pub rsrq: Option<Rsrq>,
}

impl MeasuredNeighbour {
    /// Creates a complete neighbour entry.
    pub fn new(cell_id: CellId, rsrq: Rsrq) -> Self {
        Self {
            cell_id,
            rsrq: Some(rsrq),
        }
    }
}

/// A decoded measurement report from a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementReport {
    /// The reporting terminal
    pub terminal: TerminalId,
    /// Radio quality the terminal reports towards its serving cell
    pub serving_rsrq: Rsrq,
    /// Identifier of the measurement configuration that produced the report
    pub meas_id: u8,
    /// Whether the radio layer flagged the report as carrying neighbour
    /// results
    pub has_neighbour_results: bool,
    /// The decoded neighbour entries
    pub neighbours: Vec<MeasuredNeighbour>,
}

/// Control-plane sink that executes an approved handover.
///
/// Invocations are fire-and-forget: the engine never consumes a result and
/// never retries.
pub trait HandoverTrigger: Send + Sync {
    /// Requests that `terminal` be handed over to `target_cell`.
    fn trigger_handover(&self, terminal: TerminalId, target_cell: CellId);
}

/// A [`HandoverTrigger`] that records every request it receives.
///
/// Useful as a harness sink in tests and for dry-run deployments where
/// decisions should be observed without being executed.
#[derive(Debug, Default)]
pub struct RecordingTrigger {
    fired: Mutex<Vec<(TerminalId, CellId)>>,
}

impl RecordingTrigger {
    /// Creates an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded requests in arrival order.
    pub fn fired(&self) -> Vec<(TerminalId, CellId)> {
        self.fired.lock().map(|fired| fired.clone()).unwrap_or_default()
    }
}

impl HandoverTrigger for RecordingTrigger {
    fn trigger_handover(&self, terminal: TerminalId, target_cell: CellId) {
        if let Ok(mut fired) = self.fired.lock() {
            fired.push((terminal, target_cell));
        }
    }
}

/// The mobility decision engine.
///
/// Owns the measurement table and the serving-cell associations; quality
/// samples, the handover sink and the time source are injected
/// collaborators.
pub struct MobilityEngine {
    store: MeasurementStore,
    serving_cells: HashMap<TerminalId, CellId>,
    evaluator: DecisionEvaluator,
    provider: Arc<dyn QualitySampleProvider>,
    trigger: Arc<dyn HandoverTrigger>,
    clock: Arc<dyn TimeSource>,
}

impl MobilityEngine {
    /// Creates an engine that admits every reported neighbour.
    pub fn new(
        config: MobilityConfig,
        provider: Arc<dyn QualitySampleProvider>,
        trigger: Arc<dyn HandoverTrigger>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            store: MeasurementStore::new(),
            serving_cells: HashMap::new(),
            evaluator: DecisionEvaluator::new(config),
            provider,
            trigger,
            clock,
        }
    }

    /// Creates an engine with a custom neighbour admission filter.
    pub fn with_filter(
        config: MobilityConfig,
        filter: Box<dyn NeighbourFilter>,
        provider: Arc<dyn QualitySampleProvider>,
        trigger: Arc<dyn HandoverTrigger>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            store: MeasurementStore::new(),
            serving_cells: HashMap::new(),
            evaluator: DecisionEvaluator::with_filter(config, filter),
            provider,
            trigger,
            clock,
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &MobilityConfig {
        self.evaluator.config()
    }

    /// Returns the measurement table.
    pub fn store(&self) -> &MeasurementStore {
        &self.store
    }

    /// Returns the serving cell currently associated with `terminal`.
    pub fn serving_cell(&self, terminal: TerminalId) -> Option<CellId> {
        self.serving_cells.get(&terminal).copied()
    }

    /// Associates `terminal` with its serving cell.
    ///
    /// Maintained by the surrounding connection-lifecycle layer; passing
    /// [`CellId::NONE`] clears the association.
    pub fn set_serving_cell(&mut self, terminal: TerminalId, cell: CellId) {
        if cell.is_none() {
            self.serving_cells.remove(&terminal);
            debug!("Cleared serving-cell association for terminal {terminal}");
        } else {
            self.serving_cells.insert(terminal, cell);
            debug!("Terminal {terminal} now served by {cell}");
        }
    }

    /// Releases all tracked state for `terminal`.
    ///
    /// Returns true if any state (neighbour row or serving-cell
    /// association) was removed.
    pub fn remove_terminal(&mut self, terminal: TerminalId) -> bool {
        let had_row = self.store.remove_terminal(terminal);
        let had_serving = self.serving_cells.remove(&terminal).is_some();
        if had_row || had_serving {
            debug!("Released tracked state for terminal {terminal}");
        }
        had_row || had_serving
    }

    /// Processes a decoded measurement report.
    ///
    /// Neighbour entries are folded into the measurement table first, then
    /// the terminal is evaluated against the current state. On a positive
    /// decision the handover sink is invoked exactly once before returning.
    ///
    /// # Panics
    ///
    /// Panics if a listed neighbour entry lacks its RSRQ result. The radio
    /// layer guarantees the field for every cell it reports, so its absence
    /// is a broken-collaborator condition, not a runtime state.
    pub fn report_measurement(&mut self, report: &MeasurementReport) -> HandoverDecision {
        debug!(
            "Measurement report from terminal {} (meas id {}): serving RSRQ {}, {} neighbour(s)",
            report.terminal,
            report.meas_id,
            report.serving_rsrq,
            report.neighbours.len()
        );

        if report.neighbours.is_empty() {
            if report.has_neighbour_results {
                warn!(
                    "Measurement report from terminal {} flagged as carrying neighbour \
                     results but the list is empty",
                    report.terminal
                );
            }
        } else {
            for neighbour in &report.neighbours {
                let Some(rsrq) = neighbour.rsrq else {
                    panic!(
                        "RSRQ result missing for cell {} in report from terminal {}",
                        neighbour.cell_id, report.terminal
                    );
                };
                self.store
                    .update_neighbour(report.terminal, neighbour.cell_id, rsrq);
            }
        }

        let Some(serving_cell) = self.serving_cell(report.terminal) else {
            debug!(
                "No serving-cell association for terminal {}, skipping evaluation",
                report.terminal
            );
            return HandoverDecision::NoHandover;
        };

        let decision = self.evaluator.evaluate(
            report.terminal,
            serving_cell,
            report.serving_rsrq,
            &self.store,
            self.provider.as_ref(),
            self.clock.elapsed(),
        );

        if let HandoverDecision::Handover { target_cell } = decision {
            self.trigger.trigger_handover(report.terminal, target_cell);
        }

        decision
    }
}

impl std::fmt::Debug for MobilityEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MobilityEngine")
            .field("store", &self.store)
            .field("serving_cells", &self.serving_cells)
            .field("evaluator", &self.evaluator)
            .finish_non_exhaustive()
    }
}
