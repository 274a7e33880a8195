//! Error taxonomy for the game core and its terminal front end.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// The terminal (our window/renderer surface) could not be set up or
    /// written to.  Always fatal.
    #[error("rendering surface unavailable: {0}")]
    ResourceUnavailable(#[from] std::io::Error),

    /// The input reader thread went away, so no quit signal can ever arrive.
    #[error("input source closed")]
    InputClosed,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
