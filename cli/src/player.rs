use rand::prelude::*;
use voxsweep_core::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Move {
    Reveal(Coord3),
    Flag(Coord3),
}

/// Plays from what is visible only: flags cells a number forces, opens cells a number clears,
/// guesses when neither applies.
#[derive(Clone, Debug)]
pub struct AutoPlayer {
    rng: SmallRng,
}

impl AutoPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_move<G: MineGenerator>(&mut self, game: &GameController<G>) -> Option<Move> {
        let grid = game.grid();

        if game.is_first_move() {
            let center = grid.size() / 2;
            return Some(Move::Reveal((center, center, center)));
        }

        for cell in grid.iter_cells() {
            let CellView::Revealed(count) = cell.view() else {
                continue;
            };
            if count == 0 {
                continue;
            }

            let mut hidden = Vec::new();
            let mut flagged = 0;
            for pos in grid.iter_neighbors(cell.coords()) {
                match grid.view_at(pos) {
                    Ok(CellView::Hidden) => hidden.push(pos),
                    Ok(CellView::Flagged) => flagged += 1,
                    _ => {}
                }
            }

            let Some(&first_hidden) = hidden.first() else {
                continue;
            };
            let count = usize::from(count);
            if count == flagged {
                return Some(Move::Reveal(first_hidden));
            }
            if count == flagged + hidden.len() {
                return Some(Move::Flag(first_hidden));
            }
        }

        let hidden: Vec<Coord3> = grid
            .iter_cells()
            .filter(|cell| cell.view() == CellView::Hidden)
            .map(Cell::coords)
            .collect();
        log::trace!("Guessing among {} hidden cells", hidden.len());
        hidden.choose(&mut self.rng).copied().map(Move::Reveal)
    }
}
