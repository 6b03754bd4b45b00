use serde::{Deserialize, Serialize};

/// Player-visible state of one cell, holds both the revealed and the flagged sets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed(u8),
    Flagged,
}

impl CellState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

/// How a mine is shown once the game is lost.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MineMark {
    /// The mine whose reveal ended the game.
    Detonated,
    Undetonated,
}

/// Display-only marks produced when the game is lost.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossMark {
    Mine(MineMark),
    WrongFlag,
}

/// Render-ready view of one cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub revealed: bool,
    pub flagged: bool,
    /// Adjacent mine count, only known for revealed cells.
    pub mine_adjacent: Option<u8>,
    /// Set on mines shown by the loss reveal.
    pub mine: Option<MineMark>,
    pub wrong_flag: bool,
}

impl CellView {
    pub fn new(state: CellState, mark: Option<LossMark>) -> Self {
        let mut view = match state {
            CellState::Hidden => Self::default(),
            CellState::Revealed(count) => Self {
                revealed: true,
                mine_adjacent: Some(count),
                ..Self::default()
            },
            CellState::Flagged => Self {
                flagged: true,
                ..Self::default()
            },
        };
        match mark {
            Some(LossMark::Mine(mine)) => view.mine = Some(mine),
            Some(LossMark::WrongFlag) => view.wrong_flag = true,
            None => {}
        }
        view
    }

    /// Whether the cell should be drawn as opened.
    pub const fn is_open(&self) -> bool {
        self.revealed || self.mine.is_some()
    }
}
