use rand::prelude::*;

use super::*;

/// Uniform placement by rejection sampling: draw random coordinates until enough distinct
/// cells, other than the excluded one, hold a mine.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(&mut self, size: Coord, mines: CellCount, excluded: Coord3) -> Result<MineLayout> {
        let mut layout = MineLayout::empty(size);
        // the excluded cell must stay free
        if mines >= layout.total_cells() {
            log::warn!(
                "Cannot place {} mines in {} cells and keep the first move safe",
                mines,
                layout.total_cells()
            );
            return Err(GameError::TooManyMines);
        }

        let mut draws: u32 = 0;
        while layout.mine_count() < mines {
            let coords = (
                self.rng.random_range(0..size),
                self.rng.random_range(0..size),
                self.rng.random_range(0..size),
            );
            draws += 1;
            if coords != excluded && !layout.contains_mine(coords) {
                layout.mark(coords);
            }
        }
        log::debug!("Placed {} mines in {} draws, excluding {:?}", mines, draws, excluded);

        Ok(layout)
    }
}
