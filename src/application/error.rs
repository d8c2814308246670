use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Player already exists: {0}")]
    PlayerAlreadyExists(String),

    #[error("Invalid player name: '{0}'")]
    InvalidPlayerName(String),

    #[error("At least one player must have a placement")]
    NoPlacements,

    #[error("Game not found: #{0}")]
    GameNotFound(usize),

    #[error("League file already exists: {}", .0.display())]
    LeagueAlreadyExists(PathBuf),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
