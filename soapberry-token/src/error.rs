//! Error types for tokenizer operations.

use thiserror::Error;

/// Main error type for byte source and tokenizer operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The source ran out of bytes while a strict read was in progress.
    #[error("unexpected end of stream")]
    EndOfStream,

    /// A read or peek was requested at an absolute position behind the
    /// current cursor. The cursor only moves forward.
    #[error("invalid position: requested {requested}, cursor already at {current}")]
    InvalidPosition { requested: u64, current: u64 },

    /// A token was decoded from (or encoded into) a buffer shorter than
    /// the token length.
    #[error("insufficient data: expected {expected}, got {available}")]
    InsufficientData { expected: usize, available: usize },

    /// IO error from the underlying transport.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tokenizer operations.
pub type Result<T> = std::result::Result<T, Error>;
