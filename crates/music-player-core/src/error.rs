use thiserror::Error;

/// Errors surfaced by the player core.
///
/// None of these are fatal. Index errors mean the caller asked for a slot
/// that does not exist; state is left untouched when they are returned.
#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("track index {index} out of range for playlist of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid signal graph: {0}")]
    InvalidGraph(String),

    /// Web Audio accepts powers of two between 32 and 32768.
    #[error("fft size {0} must be a power of two in 32..=32768")]
    InvalidFftSize(u32),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlayerError>;
