use alloc::vec::Vec;

use super::*;

/// Hands out a predetermined set of mines, for replays and deterministic tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedMineGenerator {
    mines: Vec<Coord3>,
}

impl FixedMineGenerator {
    pub fn new(mines: impl Into<Vec<Coord3>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(&mut self, size: Coord, mines: CellCount, excluded: Coord3) -> Result<MineLayout> {
        let layout = MineLayout::from_mine_coords(size, &self.mines)?;

        if layout.mine_count() != mines {
            log::warn!(
                "Fixed layout holds {} mines but {} were requested",
                layout.mine_count(),
                mines
            );
            return Err(GameError::InvalidBoardShape);
        }
        if layout.contains_mine(excluded) {
            log::warn!("Fixed layout has a mine on the first move at {:?}", excluded);
            return Err(GameError::InvalidCoords);
        }

        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_the_given_mines() {
        let mut generator = FixedMineGenerator::new([(0, 0, 1), (3, 3, 3)]);
        let layout = generator.generate(4, 2, (0, 0, 0)).unwrap();
        assert!(layout.contains_mine((0, 0, 1)));
        assert!(layout.contains_mine((3, 3, 3)));
        assert_eq!(layout.mine_count(), 2);
    }

    #[test]
    fn rejects_mine_on_excluded_cell() {
        let mut generator = FixedMineGenerator::new([(0, 0, 0)]);
        assert_eq!(generator.generate(4, 1, (0, 0, 0)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn rejects_count_mismatch() {
        let mut generator = FixedMineGenerator::new([(0, 0, 1)]);
        assert_eq!(generator.generate(4, 6, (0, 0, 0)), Err(GameError::InvalidBoardShape));
    }
}
