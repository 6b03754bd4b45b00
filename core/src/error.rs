use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board dimensions must be between 1 and 255")]
    InvalidSize,
    #[error("Too many mines, at least one cell must be safe")]
    TooManyMines,
    #[error("A board needs at least one mine")]
    NoMines,
    #[error("Mine layout does not match the game config")]
    InvalidLayout,
}

pub type Result<T> = core::result::Result<T, GameError>;
