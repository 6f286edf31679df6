//! Handover Decision Evaluation
//!
//! Scores the neighbour cells of a reporting terminal together with its
//! serving cell on a weighted blend of radio quality (RSRQ), experience
//! quality (QoE) and service quality (QoS), and decides whether the
//! terminal should be moved.
//!
//! The evaluation is gated: during warm-up, for terminals without any
//! neighbour observations and for terminals whose own experience is already
//! above the satisfaction ceiling, no decision is taken.

use std::time::Duration;

use mobctl_common::{CellId, QualitySample, Rsrq, TerminalId};
use tracing::{debug, info};

use crate::config::MobilityConfig;
use crate::filter::{AcceptAllNeighbours, NeighbourFilter};
use crate::provider::QualitySampleProvider;
use crate::store::MeasurementStore;

/// A scored handover candidate.
///
/// Quality components default to zero when no sample is available, so an
/// unmeasured cell competes on radio quality alone.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateCell {
    /// The candidate cell
    pub cell_id: CellId,
    /// Reported radio quality towards this cell
    pub rsrq: Rsrq,
    /// Experience quality component (MOS scale, 0.0 when unsampled)
    pub qoe: f64,
    /// Service quality component (delivery ratio, 0.0 when unsampled)
    pub qos: f64,
    /// Weighted composite score
    pub score: f64,
}

/// Outcome of evaluating a measurement report.
#[derive(Debug, Clone, PartialEq)]
pub enum HandoverDecision {
    /// Keep the terminal on its serving cell
    NoHandover,
    /// Move the terminal to the target cell
    Handover {
        /// Cell the terminal should be handed over to
        target_cell: CellId,
    },
}

impl HandoverDecision {
    /// Returns true if this decision moves the terminal.
    pub fn is_handover(&self) -> bool {
        matches!(self, HandoverDecision::Handover { .. })
    }
}

/// Evaluates handover decisions against a configured policy.
///
/// The evaluator is stateless apart from its configuration: all observations
/// come in through the [`MeasurementStore`] and the
/// [`QualitySampleProvider`], which makes decisions reproducible for a given
/// set of inputs.
pub struct DecisionEvaluator {
    config: MobilityConfig,
    filter: Box<dyn NeighbourFilter>,
}

impl DecisionEvaluator {
    /// Creates an evaluator that admits every reported neighbour.
    pub fn new(config: MobilityConfig) -> Self {
        Self {
            config,
            filter: Box::new(AcceptAllNeighbours),
        }
    }

    /// Creates an evaluator with a custom neighbour admission filter.
    pub fn with_filter(config: MobilityConfig, filter: Box<dyn NeighbourFilter>) -> Self {
        Self { config, filter }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &MobilityConfig {
        &self.config
    }

    /// Evaluates whether `terminal` should be handed over.
    ///
    /// `serving_rsrq` is the radio quality the terminal reports towards its
    /// serving cell and `now` the elapsed time since system start.
    ///
    /// Candidates are scored in ascending cell-id order with the serving
    /// cell appended last; of several equally-scored best candidates the
    /// earliest wins, so a neighbour that merely ties the serving cell is
    /// still preferred.
    pub fn evaluate(
        &self,
        terminal: TerminalId,
        serving_cell: CellId,
        serving_rsrq: Rsrq,
        store: &MeasurementStore,
        provider: &dyn QualitySampleProvider,
        now: Duration,
    ) -> HandoverDecision {
        if now < self.config.warmup() {
            debug!(
                "Skipping handover evaluation for terminal {terminal} during warm-up \
                 ({now:?} < {:?})",
                self.config.warmup()
            );
            return HandoverDecision::NoHandover;
        }

        let Some(neighbours) = store.neighbours(terminal) else {
            debug!("No neighbour observations for terminal {terminal}, skipping evaluation");
            return HandoverDecision::NoHandover;
        };

        if let Some(sample) = provider.terminal_quality(terminal) {
            if sample.qoe > self.config.qoe_ceiling {
                debug!(
                    "Terminal {terminal} is satisfied (QoE {:.2} > {:.2}), skipping evaluation",
                    sample.qoe, self.config.qoe_ceiling
                );
                return HandoverDecision::NoHandover;
            }
        }

        let mut candidates: Vec<CandidateCell> = Vec::with_capacity(neighbours.len() + 1);
        for measurement in neighbours.values() {
            if !self.filter.is_valid_neighbour(measurement.cell_id) {
                debug!(
                    "Neighbour {} rejected by admission filter for terminal {terminal}",
                    measurement.cell_id
                );
                continue;
            }
            let quality = provider
                .cell_quality(measurement.cell_id)
                .unwrap_or(QualitySample::ZERO);
            candidates.push(self.score_candidate(measurement.cell_id, measurement.rsrq, quality));
        }

        let serving_index = candidates.len();
        let serving_quality = provider
            .terminal_quality(terminal)
            .unwrap_or(QualitySample::ZERO);
        candidates.push(self.score_candidate(serving_cell, serving_rsrq, serving_quality));

        let serving_score = candidates[serving_index].score;

        let mut best_index = 0;
        for (index, candidate) in candidates.iter().enumerate() {
            if candidate.score > candidates[best_index].score {
                best_index = index;
            }
        }
        let best = &candidates[best_index];

        if best.cell_id.is_none() || best.cell_id == serving_cell {
            return HandoverDecision::NoHandover;
        }

        if best.score <= self.config.score_floor {
            debug!(
                "Best candidate {} for terminal {terminal} scored {:.2}, below floor {:.2}",
                best.cell_id, best.score, self.config.score_floor
            );
            return HandoverDecision::NoHandover;
        }

        if best.score < serving_score + self.config.handover_margin {
            debug!(
                "Best candidate {} for terminal {terminal} scored {:.2}, within margin {:.2} \
                 of serving score {:.2}",
                best.cell_id, best.score, self.config.handover_margin, serving_score
            );
            return HandoverDecision::NoHandover;
        }

        info!(
            "Handover decision for terminal {terminal}: {} -> {} (score {:.2})",
            serving_cell, best.cell_id, best.score
        );
        for (index, candidate) in candidates.iter().enumerate() {
            let marker = if index == serving_index {
                " (serving)"
            } else {
                ""
            };
            info!(
                "  candidate {}{marker}: score {:.2} rsrq {} qoe {:.2} qos {:.2}",
                candidate.cell_id, candidate.score, candidate.rsrq, candidate.qoe, candidate.qos
            );
        }

        HandoverDecision::Handover {
            target_cell: best.cell_id,
        }
    }

    fn score_candidate(&self, cell_id: CellId, rsrq: Rsrq, quality: QualitySample) -> CandidateCell {
        let score = self
            .config
            .weights
            .composite(rsrq.as_f64(), quality.qoe, quality.qos);
        CandidateCell {
            cell_id,
            rsrq,
            qoe: quality.qoe,
            qos: quality.qos,
            score,
        }
    }
}

impl std::fmt::Debug for DecisionEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionEvaluator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
