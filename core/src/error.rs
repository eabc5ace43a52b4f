use thiserror::Error;

use crate::RecordId;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board width and height must be positive and the board at most {} cells", crate::MAX_CELLS)]
    InvalidDimensions,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Player name must not be empty")]
    EmptyPlayerName,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Game has not ended yet")]
    NotFinished,
}

impl GameError {
    /// Whether this error rejects the game configuration, before any board is generated.
    pub const fn is_invalid_config(self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions | Self::TooManyMines | Self::EmptyPlayerName
        )
    }
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage backend failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Stored games could not be encoded or decoded: {0}")]
    Format(#[from] serde_json::Error),
    #[error("Game {0} not found")]
    NotFound(RecordId),
    #[error("Game is still in progress, nothing to save")]
    Unfinished,
}
