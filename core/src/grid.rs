use alloc::vec;
use alloc::vec::Vec;
use ndarray::Array3;
use serde::{Deserialize, Serialize};

use crate::*;

/// Cells opened by one flood fill, in traversal order.
///
/// `blanks` are zero-count cells (seed included) whose hidden cube disappears, `numbers` the
/// bordering cells that turn into their mine count. The two never overlap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloodFill {
    pub blanks: Vec<Coord3>,
    pub numbers: Vec<(Coord3, u8)>,
}

impl FloodFill {
    pub fn is_empty(&self) -> bool {
        self.blanks.is_empty() && self.numbers.is_empty()
    }
}

/// The cubic cell matrix of one session.
///
/// Starts with coordinates only; mines arrive once through [`GridState::place_mines`] and the
/// adjacency counts computed there are never touched again.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridState {
    cells: Array3<Cell>,
    mine_count: CellCount,
    mines_placed: bool,
    revealed_count: CellCount,
    flagged_count: CellCount,
}

impl GridState {
    pub fn new(grid_size: Coord) -> Self {
        let grid_size = grid_size.clamp(1, MAX_GRID_SIZE);
        let cells = Array3::from_shape_fn(cube_shape(grid_size), |(z, y, x)| {
            Cell::new((x as Coord, y as Coord, z as Coord))
        });
        Self {
            cells,
            mine_count: 0,
            mines_placed: false,
            revealed_count: 0,
            flagged_count: 0,
        }
    }

    /// Replaces the whole grid with a fresh one of edge `grid_size`.
    pub fn initialize(&mut self, grid_size: Coord) {
        *self = Self::new(grid_size);
    }

    pub fn size(&self) -> Coord {
        let (edge, _, _) = self.cells.dim();
        edge as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        cube(self.size())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn validate_coords(&self, coords: Coord3) -> Result<Coord3> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord3) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn view_at(&self, coords: Coord3) -> Result<CellView> {
        self.cell_at(coords).map(|cell| cell.view())
    }

    /// Cells in memory order: `x` fastest, then `y`, then `z`.
    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn iter_neighbors(&self, coords: Coord3) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn mine_coords(&self) -> Vec<Coord3> {
        self.iter_cells()
            .filter(|cell| cell.is_mine())
            .map(Cell::coords)
            .collect()
    }

    /// Cells still showing their hidden cube, flagged or not.
    pub fn hidden_count(&self) -> CellCount {
        self.total_cells() - self.revealed_count
    }

    /// Zero exactly when only mines are left hidden.
    pub fn count_remaining_hidden_non_mine_cells(&self) -> CellCount {
        self.hidden_count().saturating_sub(self.mine_count)
    }

    /// Installs `layout` and computes every safe cell's count over its 26 neighbors.
    ///
    /// Allowed once per grid, a second call means the caller lost track of the first move.
    pub fn place_mines(&mut self, layout: &MineLayout) -> Result<()> {
        if self.mines_placed {
            return Err(GameError::MinesAlreadyPlaced);
        }
        if layout.size() != self.size() {
            return Err(GameError::InvalidBoardShape);
        }

        for cell in self.cells.iter_mut() {
            let coords = cell.coords();
            if layout.contains_mine(coords) {
                cell.arm(true, 0);
            } else {
                cell.arm(false, layout.adjacent_mine_count(coords));
            }
        }
        self.mine_count = layout.mine_count();
        self.mines_placed = true;

        Ok(())
    }

    pub fn toggle_flag(&mut self, coords: Coord3) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        if cell.is_revealed() {
            return Ok(MarkOutcome::NoChange);
        }

        if cell.is_flagged() {
            cell.set_flag(false);
            self.flagged_count -= 1;
        } else {
            cell.set_flag(true);
            self.flagged_count += 1;
        }

        Ok(MarkOutcome::Changed)
    }

    /// Reveals one hidden safe cell without spreading.
    ///
    /// Mines and flagged cells are left alone.
    pub fn reveal_cell(&mut self, coords: Coord3) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = self.cells[coords.to_nd_index()];

        if cell.is_revealed() || cell.is_flagged() || cell.is_mine() {
            return Ok(MarkOutcome::NoChange);
        }

        self.open(coords);
        Ok(MarkOutcome::Changed)
    }

    /// Opens the blank region around `start` and its numbered border.
    ///
    /// `start` must be a hidden, unflagged, zero-count safe cell on a grid with mines placed,
    /// anything else yields an empty fill. Cells are marked revealed as soon as they are
    /// pushed, so each is visited at most once. Flags in the way are opened and cleared.
    pub fn reveal_flood_fill(&mut self, start: Coord3) -> Result<FloodFill> {
        let start = self.validate_coords(start)?;
        let seed = self.cells[start.to_nd_index()];
        let mut fill = FloodFill::default();

        if !self.mines_placed
            || seed.is_revealed()
            || seed.is_flagged()
            || seed.is_mine()
            || seed.mines_count() != 0
        {
            log::debug!("Flood fill refused at {:?}: {:?}", start, seed);
            return Ok(fill);
        }

        self.open(start);
        let mut stack = vec![start];

        while let Some(coords) = stack.pop() {
            fill.blanks.push(coords);

            for pos in self.iter_neighbors(coords) {
                let cell = self.cells[pos.to_nd_index()];

                if cell.is_revealed() {
                    continue;
                }

                // a blank cell has no mine around it
                self.open(pos);
                if cell.mines_count() == 0 {
                    stack.push(pos);
                } else {
                    fill.numbers.push((pos, cell.mines_count()));
                }
            }
        }

        log::trace!(
            "Flood fill from {:?} opened {} blanks and {} numbers",
            start,
            fill.blanks.len(),
            fill.numbers.len()
        );
        Ok(fill)
    }

    fn open(&mut self, coords: Coord3) {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_flagged() {
            cell.set_flag(false);
            self.flagged_count -= 1;
        }
        cell.reveal();
        self.revealed_count += 1;
    }
}
