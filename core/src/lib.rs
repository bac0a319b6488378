#![no_std]

extern crate alloc;

use core::ops::{Index, IndexMut};
use ndarray::Array3;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use controller::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use types::*;

mod cell;
mod controller;
mod error;
mod generator;
mod grid;
mod types;

/// Largest grid edge whose cell count still fits in a [`CellCount`].
pub const MAX_GRID_SIZE: Coord = 40;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid_size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(grid_size: Coord, mines: CellCount) -> Self {
        Self { grid_size, mines }
    }

    /// Clamps the edge into `1..=MAX_GRID_SIZE` and keeps at least one safe cell.
    pub fn new(grid_size: Coord, mines: CellCount) -> Self {
        let grid_size = grid_size.clamp(1, MAX_GRID_SIZE);
        let mines = mines.min(cube(grid_size).saturating_sub(1));
        Self::new_unchecked(grid_size, mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        cube(self.grid_size)
    }
}

/// Difficulty presets, cycled round-robin.
pub const DIFFICULTIES: [GameConfig; 3] = [
    GameConfig::new_unchecked(4, 6),
    GameConfig::new_unchecked(5, 16),
    GameConfig::new_unchecked(6, 32),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    /// Steps `index` through `len` slots, wrapping at both ends.
    pub const fn step(self, index: usize, len: usize) -> usize {
        match self {
            Self::Next if index + 1 >= len => 0,
            Self::Next => index + 1,
            Self::Previous if index == 0 => len.saturating_sub(1),
            Self::Previous => index - 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array3<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn empty(size: Coord) -> Self {
        Self::from_mine_mask(Array3::default(cube_shape(size)))
    }

    /// Expects a cubic mask indexed `[z, y, x]`.
    pub fn from_mine_mask(mine_mask: Array3<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord3]) -> Result<Self> {
        let mut layout = Self::empty(size);

        for &coords in mine_coords {
            let coords = layout.validate_coords(coords)?;
            layout.mark(coords);
        }

        Ok(layout)
    }

    pub fn validate_coords(&self, coords: Coord3) -> Result<Coord3> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord {
        let (edge, _, _) = self.mine_mask.dim();
        edge.try_into().unwrap_or(Coord::MAX)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        cube(self.size())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord3) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord3) -> u8 {
        // at most 26 neighbors
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord3) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }

    pub(crate) fn mark(&mut self, coords: Coord3) {
        if !self[coords] {
            self[coords] = true;
            self.mine_count += 1;
        }
    }
}

impl Index<Coord3> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord3) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

impl IndexMut<Coord3> for MineLayout {
    fn index_mut(&mut self, coords: Coord3) -> &mut Self::Output {
        &mut self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    Continue,
    Lost,
    Won,
}

impl RevealOutcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Lost | Self::Won)
    }
}
