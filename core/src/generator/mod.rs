use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Produces the mine layout for a session once the first revealed cell is known.
pub trait MineGenerator {
    /// Layout for a cubic grid of edge `size` holding `mines` mines, none of them at `excluded`.
    fn generate(&mut self, size: Coord, mines: CellCount, excluded: Coord3) -> Result<MineLayout>;
}
