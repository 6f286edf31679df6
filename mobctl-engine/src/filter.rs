//! Neighbour validity filtering
//!
//! Extension point for admission rules applied during candidate assembly.
//! The default filter admits every neighbour; deployments that need to
//! exclude cells (barred cells, closed subscriber groups, slicing
//! restrictions) swap in their own implementation without touching the
//! scoring algorithm.

use mobctl_common::CellId;

/// Decides whether a reported neighbour may be considered as a handover
/// target.
pub trait NeighbourFilter: Send + Sync {
    /// Returns true if the cell is admissible as a candidate.
    fn is_valid_neighbour(&self, cell: CellId) -> bool;
}

/// Default filter that admits every neighbour.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAllNeighbours;

impl NeighbourFilter for AcceptAllNeighbours {
    fn is_valid_neighbour(&self, _cell: CellId) -> bool {
        true
    }
}
