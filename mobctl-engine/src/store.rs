//! Neighbour Measurement Store
//!
//! This module keeps the per-terminal table of neighbour-cell radio
//! measurements. Each connected terminal has a row mapping neighbour cell
//! ids to the most recent quantized RSRQ reported for that cell; later
//! reports overwrite earlier ones, no history is retained.
//!
//! Rows are created lazily when a terminal's first neighbour result
//! arrives and persist until [`MeasurementStore::remove_terminal`] is
//! called by the connection-lifecycle collaborator. An unknown terminal is
//! reported as `None`, which is distinct from an empty row: the evaluator
//! treats it as "nothing known yet, skip", not as "zero neighbours".

use std::collections::{BTreeMap, HashMap};

use mobctl_common::{CellId, Rsrq, TerminalId};

/// Radio measurement for one (terminal, neighbour cell) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighbourMeasurement {
    /// Measured neighbour cell.
    pub cell_id: CellId,
    /// Most recent quantized RSRQ for that cell.
    pub rsrq: Rsrq,
}

/// Per-terminal neighbour measurement table.
///
/// Rows are keyed by terminal; within a row, measurements are kept in
/// ascending cell-id order. That order is what makes the evaluator's
/// first-constructed-wins tie-break deterministic, so it is part of the
/// store's contract rather than an implementation accident.
#[derive(Debug, Default)]
pub struct MeasurementStore {
    rows: HashMap<TerminalId, BTreeMap<CellId, NeighbourMeasurement>>,
}

impl MeasurementStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }

    /// Upserts the measurement for a (terminal, neighbour cell) pair.
    ///
    /// Creates the terminal's row on first use. Repeated identical calls
    /// leave the observable state unchanged; a later call for the same pair
    /// overwrites the stored value.
    pub fn update_neighbour(&mut self, terminal: TerminalId, cell: CellId, rsrq: Rsrq) {
        self.rows
            .entry(terminal)
            .or_default()
            .insert(cell, NeighbourMeasurement { cell_id: cell, rsrq });
    }

    /// Returns the known neighbours of a terminal, or `None` if the
    /// terminal has never reported one.
    ///
    /// `None` is a policy signal: the caller must skip evaluation rather
    /// than treat it as an empty neighbour set.
    pub fn neighbours(
        &self,
        terminal: TerminalId,
    ) -> Option<&BTreeMap<CellId, NeighbourMeasurement>> {
        self.rows.get(&terminal)
    }

    /// Removes a terminal's row.
    ///
    /// Returns true if a row existed.
    pub fn remove_terminal(&mut self, terminal: TerminalId) -> bool {
        self.rows.remove(&terminal).is_some()
    }

    /// Returns the number of terminals with at least one measurement.
    pub fn terminal_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no terminal has reported a measurement.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of neighbours known for a terminal (0 if unknown).
    pub fn neighbour_count(&self, terminal: TerminalId) -> usize {
        self.rows.get(&terminal).map_or(0, BTreeMap::len)
    }

    /// Returns all tracked terminal ids.
    pub fn terminal_ids(&self) -> Vec<TerminalId> {
        self.rows.keys().copied().collect()
    }
}
