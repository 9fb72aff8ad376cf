use std::fmt;
use std::io;

/// Unified error type for the sequence engine.
#[derive(Debug)]
pub enum Error {
    /// A sequence was driven through a consuming entry point twice.
    Consumed,
    /// A sequence was used after being closed.
    Closed,
    /// `next()` was called when no element is available.
    Exhausted,
    /// Invalid construction parameter (non-positive window, empty delimiter, ...).
    InvalidArgument(String),
    /// Runtime precondition violated by the data itself (unsorted input
    /// fed to comparator grouping).
    Unsorted(String),
    /// IO error from an underlying resource (file, record stream).
    Io(io::Error),
    /// Bad record framing (CRC mismatch, truncated frame, bad payload).
    Corruption(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Consumed => write!(f, "sequence can only be consumed once"),
            Error::Closed => write!(f, "sequence is already closed"),
            Error::Exhausted => write!(f, "no further element"),
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Error::Unsorted(msg) => write!(f, "input not sorted: {msg}"),
            Error::Io(e) => write!(f, "IO error: {e}"),
            Error::Corruption(msg) => write!(f, "corruption: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

/// Result type alias used throughout the engine.
pub type Result<T> = std::result::Result<T, Error>;
