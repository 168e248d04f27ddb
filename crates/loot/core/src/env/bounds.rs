use crate::state::{GridId, ScreenRect};

/// Presentation collaborator that knows where each grid is drawn.
///
/// Grids without an on-screen rectangle (hidden panels, stored layouts) return
/// `None` and are skipped by pointer resolution.
pub trait BoundsOracle: Send + Sync {
    fn grid_bounds(&self, grid: GridId) -> Option<ScreenRect>;
}
