use serde::{Deserialize, Serialize};

use crate::Coord3;

/// Player-visible state of a cell, all a presentation layer needs to draw it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

/// One grid position.
///
/// `mines_count` is only meaningful for cells without a mine, and only after the
/// grid has had its mines placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    coords: Coord3,
    is_mine: bool,
    mines_count: u8,
    marked_mine: bool,
    revealed: bool,
}

impl Cell {
    pub const fn new(coords: Coord3) -> Self {
        Self {
            coords,
            is_mine: false,
            mines_count: 0,
            marked_mine: false,
            revealed: false,
        }
    }

    pub const fn coords(&self) -> Coord3 {
        self.coords
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn mines_count(&self) -> u8 {
        self.mines_count
    }

    pub const fn is_flagged(&self) -> bool {
        self.marked_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_hidden(&self) -> bool {
        !self.revealed
    }

    pub const fn view(&self) -> CellView {
        match (self.revealed, self.marked_mine) {
            (true, _) => CellView::Revealed(self.mines_count),
            (false, true) => CellView::Flagged,
            (false, false) => CellView::Hidden,
        }
    }

    pub(crate) fn arm(&mut self, is_mine: bool, mines_count: u8) {
        self.is_mine = is_mine;
        self.mines_count = if is_mine { 0 } else { mines_count };
    }

    pub(crate) fn set_flag(&mut self, flagged: bool) {
        self.marked_mine = flagged;
    }

    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }
}
