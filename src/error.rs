//! Unified error type for the flickview playback core.
//!
//! Only failures that happen *outside* a running session go through
//! [`Error`] (bad construction input, config parsing, library enumeration).
//! Failures inside a session are reported through the state stream as
//! [`PlayerState::Error`](crate::session::PlayerState::Error) so every
//! observer sees them through the same interface as normal transitions.

/// Unified error type covering all failure modes in flickview.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A source locator was rejected before a session was created.
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    /// Input data failed validation (config parse, malformed model).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The video library backend failed to enumerate media.
    #[error("Library error: {0}")]
    Library(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Convenience constructor for [`Error::InvalidSource`].
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Error::InvalidSource(message.into())
    }

    /// Convenience constructor for [`Error::Library`].
    pub fn library(message: impl Into<String>) -> Self {
        Error::Library(message.into())
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
