//! Error types for Clockwork Base32 operations.
//!
//! Decoding has a single domain failure, [`Error::CorruptInput`]. Failures of
//! the wrapped reader or writer are carried verbatim in [`Error::Io`].

use std::io;
use thiserror::Error;

/// Clockwork Base32 errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A symbol outside the case-folded, alias-folded alphabet.
    ///
    /// `offset` is the 0-based byte position of the offending symbol within
    /// the whole symbol sequence.
    #[error("Corrupt input at offset {offset}")]
    CorruptInput {
        /// Byte offset of the first invalid symbol.
        offset: u64,
    },

    /// I/O error from the underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for Clockwork Base32 operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a corrupt input error.
    pub fn corrupt_input(offset: u64) -> Self {
        Self::CorruptInput { offset }
    }

    /// Offset of the invalid symbol, if this is a corrupt input error.
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::CorruptInput { offset } => Some(*offset),
            Self::Io(_) => None,
        }
    }

    /// Recover a corrupt input offset from an I/O error produced by
    /// [`ClockworkReader`](crate::ClockworkReader).
    pub fn corrupt_offset_of(err: &io::Error) -> Option<u64> {
        err.get_ref()
            .and_then(|inner| inner.downcast_ref::<Error>())
            .and_then(Error::offset)
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(e) => e,
            corrupt @ Error::CorruptInput { .. } => {
                io::Error::new(io::ErrorKind::InvalidData, corrupt)
            }
        }
    }
}

/// A failure recorded by a streaming adapter.
///
/// `io::Error` is not `Clone`, so the adapters keep this record and hand out a
/// fresh error on every call after the first failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StickyError {
    Io {
        kind: io::ErrorKind,
        message: String,
    },
    Corrupt { offset: u64 },
}

impl StickyError {
    pub(crate) fn record(err: &io::Error) -> Self {
        match Error::corrupt_offset_of(err) {
            Some(offset) => Self::Corrupt { offset },
            None => Self::Io {
                kind: err.kind(),
                message: err.to_string(),
            },
        }
    }

    pub(crate) fn to_io_error(&self) -> io::Error {
        match self {
            Self::Io { kind, message } => io::Error::new(*kind, message.clone()),
            Self::Corrupt { offset } => Error::corrupt_input(*offset).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::corrupt_input(7);
        assert_eq!(err.to_string(), "Corrupt input at offset 7");
        assert_eq!(err.offset(), Some(7));

        let err: Error = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed").into();
        assert!(err.to_string().contains("pipe closed"));
        assert_eq!(err.offset(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err: io::Error = Error::corrupt_input(4).into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(Error::corrupt_offset_of(&io_err), Some(4));

        let original = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let io_err: io::Error = Error::Io(original).into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
        assert_eq!(Error::corrupt_offset_of(&io_err), None);
    }

    #[test]
    fn test_sticky_replay() {
        let sticky = StickyError::record(&io::Error::new(io::ErrorKind::WriteZero, "sink full"));
        let first = sticky.to_io_error();
        let second = sticky.to_io_error();
        assert_eq!(first.kind(), io::ErrorKind::WriteZero);
        assert_eq!(first.to_string(), second.to_string());

        let sticky = StickyError::record(&Error::corrupt_input(9).into());
        assert_eq!(sticky, StickyError::Corrupt { offset: 9 });
        assert_eq!(Error::corrupt_offset_of(&sticky.to_io_error()), Some(9));
    }
}
