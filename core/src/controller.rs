use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Pause a presentation layer should leave between a finished session and [`GameController::restart`].
pub const SETTLE_DELAY: Duration = Duration::from_millis(1500);

/// Valid transitions:
/// - Fresh -> Playing (first reveal)
/// - Fresh -> Lost / Won (first reveal ends the game at once)
/// - Playing -> Lost / Won
/// - any -> Fresh (restart or difficulty change)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Fresh,
    Playing,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_fresh(self) -> bool {
        matches!(self, Self::Fresh)
    }

    /// Won or lost, the board takes no more moves until restart.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Fresh
    }
}

/// Everything the presentation layer has to change after a reveal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealReport {
    pub outcome: RevealOutcome,
    pub blanks_to_remove: Vec<Coord3>,
    pub numbers_to_reveal: Vec<(Coord3, u8)>,
    /// The mine that ended the session.
    pub triggered_mine: Option<Coord3>,
    /// Every mine on the grid, only filled on a loss.
    pub mines: Vec<Coord3>,
}

impl RevealReport {
    pub fn unchanged() -> Self {
        Self {
            outcome: RevealOutcome::Continue,
            blanks_to_remove: Vec::new(),
            numbers_to_reveal: Vec::new(),
            triggered_mine: None,
            mines: Vec::new(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagReport {
    pub flagged: bool,
    pub changed: bool,
}

/// A freshly initialized board, every coordinate hidden.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardReset {
    pub config: GameConfig,
    pub cells: Vec<Coord3>,
}

/// Runs sessions over the difficulty presets: lazy mine placement on the first reveal, turn
/// sequencing, win and loss detection.
///
/// Stale input (out-of-bounds coordinates, moves on a finished board, flagged or revealed cells)
/// is absorbed as an unchanged report. Only caller bugs surface as errors.
#[derive(Clone, Debug)]
pub struct GameController<G = RandomMineGenerator> {
    generator: G,
    difficulty_index: usize,
    grid: GridState,
    state: SessionState,
}

impl<G: MineGenerator> GameController<G> {
    pub fn new(generator: G) -> Self {
        Self::with_difficulty(generator, 0)
    }

    pub fn with_difficulty(generator: G, difficulty_index: usize) -> Self {
        let difficulty_index = difficulty_index % DIFFICULTIES.len();
        Self {
            generator,
            difficulty_index,
            grid: GridState::new(DIFFICULTIES[difficulty_index].grid_size),
            state: Default::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn difficulty(&self) -> GameConfig {
        DIFFICULTIES[self.difficulty_index]
    }

    pub fn difficulty_index(&self) -> usize {
        self.difficulty_index
    }

    pub fn grid_size(&self) -> Coord {
        self.difficulty().grid_size
    }

    pub fn total_mines(&self) -> CellCount {
        self.difficulty().mines
    }

    pub fn is_first_move(&self) -> bool {
        !self.grid.mines_placed()
    }

    /// How many mines have not been flagged yet
    pub fn mines_left(&self) -> isize {
        (self.total_mines() as isize) - (self.grid.flagged_count() as isize)
    }

    pub fn change_difficulty(&mut self) -> GameConfig {
        self.select_difficulty(Direction::Next)
    }

    /// Moves to the neighboring preset and starts over on a fresh grid.
    pub fn select_difficulty(&mut self, direction: Direction) -> GameConfig {
        self.difficulty_index = direction.step(self.difficulty_index, DIFFICULTIES.len());
        let config = self.difficulty();
        log::debug!(
            "Difficulty {}: {} cells per edge, {} mines",
            self.difficulty_index,
            config.grid_size,
            config.mines
        );
        self.restart();
        config
    }

    pub fn restart(&mut self) -> BoardReset {
        let config = self.difficulty();
        self.grid.initialize(config.grid_size);
        self.state = SessionState::Fresh;
        log::debug!("Restarted with {:?}", config);

        BoardReset {
            config,
            cells: self.grid.iter_cells().map(Cell::coords).collect(),
        }
    }

    /// Places the mines around the player's first reveal at `coords`.
    ///
    /// [`GameController::reveal`] does this on its own, calling it a second time in one
    /// session fails with [`GameError::MinesAlreadyPlaced`].
    pub fn on_first_reveal(&mut self, coords: Coord3) -> Result<()> {
        let coords = self.grid.validate_coords(coords)?;
        if self.grid.mines_placed() {
            return Err(GameError::MinesAlreadyPlaced);
        }

        let config = self.difficulty();
        let layout = self.generator.generate(config.grid_size, config.mines, coords)?;
        self.grid.place_mines(&layout)?;
        self.state = SessionState::Playing;
        log::debug!("First move at {:?}, {} mines placed", coords, layout.mine_count());

        Ok(())
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    pub fn reveal(&mut self, coords: Coord3) -> Result<RevealReport> {
        if let Err(err) = self.check_not_finished() {
            log::debug!("Ignoring reveal at {:?}: {}", coords, err);
            return Ok(RevealReport::unchanged());
        }

        let cell = match self.grid.cell_at(coords) {
            Ok(cell) => cell,
            Err(err) => {
                log::debug!("Ignoring reveal at {:?}: {}", coords, err);
                return Ok(RevealReport::unchanged());
            }
        };
        if cell.is_flagged() || cell.is_revealed() {
            return Ok(RevealReport::unchanged());
        }

        if self.is_first_move() {
            self.on_first_reveal(coords)?;
        }

        // armed by now
        let cell = self.grid.cell_at(coords)?;
        let mut report = RevealReport::unchanged();

        if cell.is_mine() {
            self.state = SessionState::Lost;
            log::debug!("Mine hit at {:?}", coords);
            report.outcome = RevealOutcome::Lost;
            report.triggered_mine = Some(coords);
            report.mines = self.grid.mine_coords();
            return Ok(report);
        }

        if cell.mines_count() > 0 {
            self.grid.reveal_cell(coords)?;
            report.numbers_to_reveal.push((coords, cell.mines_count()));
        } else {
            let fill = self.grid.reveal_flood_fill(coords)?;
            report.blanks_to_remove = fill.blanks;
            report.numbers_to_reveal = fill.numbers;
        }

        if self.grid.count_remaining_hidden_non_mine_cells() == 0 {
            self.state = SessionState::Won;
            log::debug!("Won after revealing {:?}", coords);
            report.outcome = RevealOutcome::Won;
        }

        Ok(report)
    }

    pub fn toggle_flag(&mut self, coords: Coord3) -> FlagReport {
        let flagged = self
            .grid
            .view_at(coords)
            .is_ok_and(|view| view == CellView::Flagged);

        match self
            .check_not_finished()
            .and_then(|()| self.grid.toggle_flag(coords))
        {
            Ok(outcome) => FlagReport {
                flagged: flagged != outcome.has_update(),
                changed: outcome.has_update(),
            },
            Err(err) => {
                log::debug!("Ignoring flag at {:?}: {}", coords, err);
                FlagReport {
                    flagged,
                    changed: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const MINES: [Coord3; 6] = [
        (2, 0, 0),
        (0, 2, 0),
        (0, 0, 2),
        (2, 2, 2),
        (3, 3, 3),
        (3, 0, 3),
    ];

    fn controller() -> GameController<FixedMineGenerator> {
        GameController::new(FixedMineGenerator::new(MINES))
    }

    #[test]
    fn first_reveal_places_mines_and_counts_neighbors() {
        let mut game = controller();
        assert!(game.is_first_move());

        let report = game.reveal((0, 0, 0)).unwrap();

        assert!(!game.is_first_move());
        assert_eq!(game.state(), SessionState::Playing);
        assert_eq!(report.outcome, RevealOutcome::Continue);
        assert_eq!(report.blanks_to_remove, vec![(0, 0, 0)]);
        assert_eq!(report.numbers_to_reveal.len(), 7);
        assert!(report.numbers_to_reveal.contains(&((1, 1, 1), 4)));
        assert!(report.numbers_to_reveal.contains(&((1, 1, 0), 2)));
        assert!(report.numbers_to_reveal.contains(&((1, 0, 0), 1)));

        let count = |coords| game.grid().cell_at(coords).unwrap().mines_count();
        assert_eq!(count((3, 3, 2)), 2);
        assert_eq!(count((3, 0, 2)), 1);
    }

    #[test]
    fn numbered_cell_reveals_alone() {
        let mut game = controller();
        game.reveal((0, 0, 0)).unwrap();

        let report = game.reveal((3, 3, 2)).unwrap();

        assert_eq!(report.numbers_to_reveal, vec![((3, 3, 2), 2)]);
        assert!(report.blanks_to_remove.is_empty());
        assert_eq!(
            game.grid().view_at((3, 3, 2)).unwrap(),
            CellView::Revealed(2)
        );
    }

    #[test]
    fn mine_loses_without_touching_other_cells() {
        let mut game = controller();
        game.reveal((0, 0, 0)).unwrap();
        let before = game.grid().clone();

        let report = game.reveal((2, 2, 2)).unwrap();

        assert_eq!(report.outcome, RevealOutcome::Lost);
        assert_eq!(report.triggered_mine, Some((2, 2, 2)));
        assert_eq!(report.mines.len(), MINES.len());
        assert_eq!(game.state(), SessionState::Lost);
        assert_eq!(game.grid(), &before);
    }

    #[test]
    fn finished_session_ignores_moves_until_restart() {
        let mut game = controller();
        game.reveal((0, 0, 0)).unwrap();
        game.reveal((2, 0, 0)).unwrap();

        assert_eq!(game.check_not_finished(), Err(GameError::AlreadyEnded));
        assert_eq!(game.reveal((3, 3, 2)).unwrap(), RevealReport::unchanged());
        assert!(!game.toggle_flag((3, 2, 2)).changed);

        let reset = game.restart();
        assert_eq!(reset.cells.len(), 64);
        assert_eq!(reset.config, DIFFICULTIES[0]);
        assert_eq!(game.state(), SessionState::Fresh);
        assert!(game.is_first_move());
    }

    #[test]
    fn revealing_every_safe_cell_wins() {
        let mut game = controller();
        let safe: Vec<Coord3> = game
            .grid()
            .iter_cells()
            .map(Cell::coords)
            .filter(|coords| !MINES.contains(coords))
            .collect();

        for coords in safe {
            if game.state().is_finished() {
                break;
            }
            let report = game.reveal(coords).unwrap();
            let remaining = game.grid().count_remaining_hidden_non_mine_cells();
            assert_eq!(report.outcome == RevealOutcome::Won, remaining == 0);
        }

        assert_eq!(game.state(), SessionState::Won);
        assert_eq!(game.grid().hidden_count(), game.total_mines());
    }

    #[test]
    fn flagged_cell_ignores_reveal() {
        let mut game = controller();

        assert_eq!(
            game.toggle_flag((0, 0, 0)),
            FlagReport {
                flagged: true,
                changed: true
            }
        );
        let report = game.reveal((0, 0, 0)).unwrap();

        assert_eq!(report, RevealReport::unchanged());
        assert!(game.is_first_move());
        assert_eq!(game.mines_left(), 5);
    }

    #[test]
    fn flood_fill_opens_flagged_border_cell() {
        let mut game = controller();
        assert!(game.toggle_flag((1, 1, 1)).changed);
        assert_eq!(game.mines_left(), 5);

        let report = game.reveal((0, 0, 0)).unwrap();

        assert!(report.numbers_to_reveal.contains(&((1, 1, 1), 4)));
        assert_eq!(
            game.grid().view_at((1, 1, 1)).unwrap(),
            CellView::Revealed(4)
        );
        assert_eq!(game.grid().flagged_count(), 0);
        assert_eq!(game.mines_left(), 6);
    }

    #[test]
    fn double_toggle_restores_flag() {
        let mut game = controller();
        game.reveal((0, 0, 0)).unwrap();
        let before = game.grid().clone();

        assert!(game.toggle_flag((3, 3, 3)).flagged);
        assert!(!game.toggle_flag((3, 3, 3)).flagged);

        assert_eq!(game.grid(), &before);
    }

    #[test]
    fn flag_on_revealed_cell_is_refused() {
        let mut game = controller();
        game.reveal((0, 0, 0)).unwrap();
        assert_eq!(
            game.toggle_flag((1, 1, 1)),
            FlagReport {
                flagged: false,
                changed: false
            }
        );
    }

    #[test]
    fn out_of_bounds_moves_are_ignored() {
        let mut game = controller();
        assert_eq!(game.reveal((4, 0, 0)).unwrap(), RevealReport::unchanged());
        assert!(!game.toggle_flag((0, 9, 0)).changed);
        assert!(game.is_first_move());
    }

    #[test]
    fn second_mine_placement_is_an_error() {
        let mut game = controller();
        game.reveal((0, 0, 0)).unwrap();
        assert_eq!(
            game.on_first_reveal((0, 0, 0)),
            Err(GameError::MinesAlreadyPlaced)
        );
    }

    #[test]
    fn difficulty_cycles_through_presets() {
        let mut game = GameController::new(RandomMineGenerator::new(3));
        assert_eq!(game.grid_size(), 4);

        let sizes: Vec<Coord> = (0..3)
            .map(|_| game.change_difficulty().grid_size)
            .collect();

        assert_eq!(sizes, vec![5, 6, 4]);
        assert_eq!(game.select_difficulty(Direction::Previous).mines, 32);
        assert_eq!(game.grid().size(), 6);
        assert!(game.is_first_move());
    }

    #[test]
    fn random_first_reveal_is_always_safe() {
        for seed in 0..50 {
            let mut game = GameController::with_difficulty(RandomMineGenerator::new(seed), 2);
            let report = game.reveal((3, 3, 3)).unwrap();
            assert_ne!(report.outcome, RevealOutcome::Lost);
            assert_eq!(game.grid().mine_count(), 32);
        }
    }
}
