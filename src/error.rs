//! Error types for Chorus.

use thiserror::Error;

/// Result type alias using Chorus's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Chorus operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The peer end of a channel hung up.
    ///
    /// On the send side this means every receiver is gone; on the receive
    /// side it means every sender is gone and the channel is drained.
    #[error("channel disconnected: {0}")]
    Disconnected(&'static str),

    /// A merge was requested with no input channels.
    #[error("merge requires at least one input")]
    NoInputs,

    /// A bounded send would have overflowed the channel.
    #[error("channel full: {0}")]
    Full(&'static str),

    /// I/O error (driver output).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
