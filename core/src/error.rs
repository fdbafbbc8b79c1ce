use thiserror::Error;

use crate::Coord2;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Position {0:?} is outside the grid")]
    OutOfBounds(Coord2),
    #[error("Grid dimensions must be at least 1x1")]
    InvalidSize,
    #[error("Snapshot shape does not match declared size")]
    InvalidSnapshot,
    #[error("Snapshot data could not be decoded")]
    MalformedSnapshot,
    #[error("Unknown game mode")]
    UnknownMode,
}

pub type Result<T> = core::result::Result<T, GameError>;
