use sweeper_core::{Board, GameConfig, PressedCells};

use crate::command::Command;
use crate::render;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// Owns the board for the lifetime of the program and turns commands into engine calls.
pub(crate) struct Session {
    board: Board,
    pressed: PressedCells,
}

impl Session {
    pub(crate) fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            board: Board::new(config, seed),
            pressed: PressedCells::new(),
        }
    }

    pub(crate) fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn execute(&mut self, command: Command) -> anyhow::Result<Flow> {
        self.pressed.clear();

        match command {
            Command::Reveal(coords) => {
                let report = self.board.reveal(coords)?;
                if report.has_update() {
                    log::info!(
                        "reveal {:?}: {:?}, opened {} cells",
                        coords,
                        report.outcome,
                        report.opened.len()
                    );
                } else {
                    log::debug!("reveal {:?}: nothing to do", coords);
                }
            }
            Command::Flag(coords) => {
                if self.board.toggle_flag(coords)?.has_update() {
                    log::info!("flag {:?}, {} mines left", coords, self.board.mines_left());
                } else {
                    log::debug!("flag {:?}: nothing to do", coords);
                }
            }
            Command::Press(coords) => {
                self.pressed = self.board.pressed_cells(coords)?;
            }
            Command::NewGame => {
                log::info!("new game");
                self.board.restart();
            }
            Command::Help => {}
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    pub(crate) fn render(&self) -> String {
        render::render_board(&self.board.snapshot(), &self.pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{CellState, GameState};

    fn session() -> Session {
        Session::new(GameConfig::new(8, 6, 5).unwrap(), 1234)
    }

    #[test]
    fn first_reveal_starts_the_game() {
        let mut session = session();

        let flow = session.execute(Command::Reveal((2, 3))).unwrap();

        assert_eq!(flow, Flow::Continue);
        assert_ne!(session.board().state(), GameState::NotStarted);
        assert_ne!(session.board().state(), GameState::Lost);
        assert!(session.board().cell_at((2, 3)).is_revealed());
    }

    #[test]
    fn flag_command_updates_counter() {
        let mut session = session();

        session.execute(Command::Flag((0, 0))).unwrap();

        assert_eq!(session.board().mines_left(), 4);
        assert_eq!(session.board().cell_at((0, 0)), CellState::Flagged);
        assert!(session.render().starts_with("004"));
    }

    #[test]
    fn press_preview_lasts_one_render() {
        let mut session = session();

        session.execute(Command::Press((1, 1))).unwrap();
        assert!(session.render().contains('_'));

        session.execute(Command::Help).unwrap();
        assert!(!session.render().contains('_'));
    }

    #[test]
    fn out_of_range_is_reported_not_applied() {
        let mut session = session();

        assert!(session.execute(Command::Reveal((6, 0))).is_err());
        assert_eq!(session.board().state(), GameState::NotStarted);
    }

    #[test]
    fn new_game_and_quit() {
        let mut session = session();
        session.execute(Command::Flag((0, 0))).unwrap();

        session.execute(Command::NewGame).unwrap();
        assert_eq!(session.board().mines_left(), 5);

        assert_eq!(session.execute(Command::Quit).unwrap(), Flow::Quit);
    }
}
