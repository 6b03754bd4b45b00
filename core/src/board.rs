use alloc::vec::Vec;
use core::num::Saturating;
use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// No reveal yet, mines are not placed
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Cells drawn as pressed while the primary button is held on a cell.
pub type PressedCells = SmallVec<[Coord2; 8]>;

/// One game from first reveal to win or loss.
#[derive(Clone, Debug)]
pub struct Board {
    config: GameConfig,
    rng: SmallRng,
    mine_layout: Option<MineLayout>,
    cells: Array2<CellState>,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    state: GameState,
    stopwatch: Stopwatch,
    loss: Option<LossOverlay>,
}

impl Board {
    /// Fresh board, mines are placed on the first reveal from a generator seeded by `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
            mine_layout: None,
            cells: Array2::default(config.size.to_nd_index()),
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            state: GameState::NotStarted,
            stopwatch: Stopwatch::default(),
            loss: None,
        }
    }

    /// Board with a predetermined mine layout; the first reveal uses it as is.
    pub fn with_layout(layout: MineLayout) -> Result<Self> {
        let config = layout.game_config();
        if config.mines == 0 || config.mines >= config.total_cells() {
            return Err(GameError::InvalidLayout);
        }
        let mut board = Self::new(config, 0);
        board.mine_layout = Some(layout);
        Ok(board)
    }

    /// Discards the current game and starts a new one with `config`.
    pub fn start_game(&mut self, config: GameConfig) {
        log::debug!(
            "New game {}x{} with {} mines",
            config.width(),
            config.height(),
            config.mines
        );
        self.config = config;
        self.mine_layout = None;
        self.cells = Array2::default(config.size.to_nd_index());
        self.revealed_count = Saturating(0);
        self.flagged_count = Saturating(0);
        self.state = GameState::NotStarted;
        self.stopwatch.reset();
        self.loss = None;
    }

    pub fn restart(&mut self) {
        self.start_game(self.config);
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    /// Mines minus flags, negative when over-flagged
    pub fn mines_left(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.flagged_count.0)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.stopwatch.elapsed_secs()
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn mine_layout(&self) -> Option<&MineLayout> {
        self.mine_layout.as_ref()
    }

    pub fn loss_overlay(&self) -> Option<&LossOverlay> {
        self.loss.as_ref()
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.loss.as_ref().map(LossOverlay::triggered)
    }

    pub fn cell_at(&self, coords: Coord2) -> CellState {
        self.cells[coords.to_nd_index()]
    }

    pub fn cell_view(&self, coords: Coord2) -> CellView {
        let mark = self.loss.as_ref().and_then(|loss| loss.mark_at(coords));
        CellView::new(self.cell_at(coords), mark)
    }

    pub fn snapshot(&self) -> BoardView {
        BoardView::from_board(self)
    }

    /// Cells to draw pressed while the primary button is held on `coords`.
    pub fn pressed_cells(&self, coords: Coord2) -> Result<PressedCells> {
        let coords = self.config.validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(PressedCells::new());
        }

        Ok(match self.cell_at(coords) {
            CellState::Hidden => smallvec::smallvec![coords],
            CellState::Flagged => PressedCells::new(),
            CellState::Revealed(_) => self
                .iter_neighbors(coords)
                .filter(|&pos| self.cell_at(pos) == CellState::Hidden)
                .collect(),
        })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use CellState::*;
        use MarkOutcome::*;

        let coords = self.config.validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(NoChange);
        }

        Ok(match self.cells[coords.to_nd_index()] {
            Hidden => {
                self.cells[coords.to_nd_index()] = Flagged;
                self.flagged_count += 1;
                Changed
            }
            Flagged => {
                self.cells[coords.to_nd_index()] = Hidden;
                self.flagged_count -= 1;
                Changed
            }
            Revealed(_) => NoChange,
        })
    }

    /// Reveals a hidden cell, or chords when `coords` is an already revealed number.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        let coords = self.config.validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(RevealReport::no_change());
        }

        match self.cell_at(coords) {
            CellState::Flagged | CellState::Revealed(0) => Ok(RevealReport::no_change()),
            CellState::Revealed(count) => Ok(self.chord_reveal(coords, count)),
            CellState::Hidden => {
                self.mark_started(coords)?;
                let mut opened = Vec::new();
                let outcome = self.reveal_hidden(coords, &mut opened);
                Ok(RevealReport { outcome, opened })
            }
        }
    }

    /// Resolves every hidden neighbor when the flagged neighbors match the count exactly.
    fn chord_reveal(&mut self, coords: Coord2, count: u8) -> RevealReport {
        let flagged = self.count_flagged_neighbors(coords);
        if flagged != count {
            log::debug!(
                "Chord at {:?} skipped, {} flags for count {}",
                coords,
                flagged,
                count
            );
            return RevealReport::no_change();
        }

        let mut opened = Vec::new();
        let mut outcome = RevealOutcome::NoChange;
        for pos in self.iter_neighbors(coords) {
            if self.state.is_finished() {
                break;
            }
            if self.cell_at(pos) == CellState::Hidden {
                outcome = outcome | self.reveal_hidden(pos, &mut opened);
            }
        }
        RevealReport { outcome, opened }
    }

    /// Opens a hidden cell and flood-fills from it when it has no adjacent mines.
    fn reveal_hidden(&mut self, coords: Coord2, opened: &mut Vec<Coord2>) -> RevealOutcome {
        let Some(layout) = &self.mine_layout else {
            return RevealOutcome::NoChange;
        };

        if layout.contains_mine(coords) {
            self.reveal_all(coords);
            return RevealOutcome::HitMine;
        }

        let first_opened = opened.len();
        let mut to_visit = Vec::from([coords]);
        while let Some(visit_coords) = to_visit.pop() {
            if self.cells[visit_coords.to_nd_index()] != CellState::Hidden {
                continue;
            }

            let count = layout.adjacent_mine_count(visit_coords);
            self.cells[visit_coords.to_nd_index()] = CellState::Revealed(count);
            self.revealed_count += 1;
            opened.push(visit_coords);
            log::trace!("Opened cell at {:?}, mine count: {}", visit_coords, count);

            if count == 0 {
                let cells = &self.cells;
                to_visit.extend(layout.iter_neighbors(visit_coords).filter(|&pos| {
                    cells[pos.to_nd_index()] == CellState::Hidden && !layout.contains_mine(pos)
                }));
            }
        }
        log::debug!(
            "Reveal at {:?} opened {} cells",
            coords,
            opened.len() - first_opened
        );

        if self.revealed_count.0 == self.config.safe_cell_count() {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Places the mines on the first reveal, keeping `first` safe, and starts the clock.
    fn mark_started(&mut self, first: Coord2) -> Result<()> {
        if !self.state.is_initial() {
            return Ok(());
        }

        if self.mine_layout.is_none() {
            let generator = RandomMinefieldGenerator::new(self.rng.random());
            self.mine_layout = Some(generator.generate(self.config, first)?);
        }
        self.state = GameState::InProgress;
        self.stopwatch.start();
        log::debug!("Game started at {:?}", first);
        Ok(())
    }

    /// Ends the game as lost and builds the display overlay showing every mine.
    fn reveal_all(&mut self, triggered: Coord2) {
        if let Some(layout) = &self.mine_layout {
            self.loss = Some(LossOverlay::build(layout, &self.cells, triggered));
        }
        self.end_game(false);
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        self.stopwatch.stop();
        log::debug!("Game ended: {:?}", self.state);
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self.cell_at(pos).is_flagged())
            .count() as u8
    }

    fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.config.size)
    }
}
