//! Quality Sample Provider
//!
//! Read-only source of application-quality samples consumed by the
//! decision evaluator. Samples exist in two independent scopes: the
//! terminal's own current sample and a per-cell aggregate. "No sample
//! available" is a distinct state from "sample is zero" at this boundary;
//! the evaluator performs the zero-normalization itself.
//!
//! Reads must be fast and non-blocking since they sit on the decision
//! path. The bundled [`InMemoryQualityProvider`] satisfies that with two
//! maps fed by the surrounding telemetry collector; networked deployments
//! put a cache behind the same trait.

use std::collections::HashMap;
use std::sync::RwLock;

use mobctl_common::{CellId, QualitySample, TerminalId};

/// Read-only source of application-quality samples.
///
/// Implementations supply the QoE/QoS data the evaluator blends with radio
/// measurements; both lookups must be cheap and side-effect-free.
pub trait QualitySampleProvider: Send + Sync {
    /// Current quality sample of the terminal itself, or `None` if the
    /// provider has nothing for it.
    fn terminal_quality(&self, terminal: TerminalId) -> Option<QualitySample>;

    /// Aggregate quality sample of a cell, or `None` if the provider has
    /// nothing for it.
    fn cell_quality(&self, cell: CellId) -> Option<QualitySample>;
}

/// In-memory provider backed by two maps.
///
/// The feed side (telemetry collector, test setup) writes through `&self`,
/// so the provider can be shared read-only with the engine while samples
/// keep arriving.
#[derive(Debug, Default)]
pub struct InMemoryQualityProvider {
    terminals: RwLock<HashMap<TerminalId, QualitySample>>,
    cells: RwLock<HashMap<CellId, QualitySample>>,
}

impl InMemoryQualityProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the terminal's own current sample.
    pub fn set_terminal_quality(&self, terminal: TerminalId, sample: QualitySample) {
        if let Ok(mut map) = self.terminals.write() {
            map.insert(terminal, sample);
        }
    }

    /// Records a cell's aggregate sample.
    pub fn set_cell_quality(&self, cell: CellId, sample: QualitySample) {
        if let Ok(mut map) = self.cells.write() {
            map.insert(cell, sample);
        }
    }

    /// Forgets the terminal's sample. Returns true if one was present.
    pub fn clear_terminal_quality(&self, terminal: TerminalId) -> bool {
        self.terminals
            .write()
            .map(|mut map| map.remove(&terminal).is_some())
            .unwrap_or(false)
    }

    /// Forgets a cell's sample. Returns true if one was present.
    pub fn clear_cell_quality(&self, cell: CellId) -> bool {
        self.cells
            .write()
            .map(|mut map| map.remove(&cell).is_some())
            .unwrap_or(false)
    }
}

impl QualitySampleProvider for InMemoryQualityProvider {
    fn terminal_quality(&self, terminal: TerminalId) -> Option<QualitySample> {
        self.terminals.read().ok()?.get(&terminal).copied()
    }

    fn cell_quality(&self, cell: CellId) -> Option<QualitySample> {
        self.cells.read().ok()?.get(&cell).copied()
    }
}
