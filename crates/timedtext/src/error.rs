use std::collections::TryReserveError;

use bstr::BString;
use thiserror::Error;

/// Failures reported by [`Buffer`](crate::Buffer). The buffer is unchanged
/// whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// The retained text could not grow to take the new chunk.
    #[error("could not grow buffer: {0}")]
    Alloc(#[from] TryReserveError),
    /// A seek target fell outside the retained text.
    #[error("seek target {target} outside of buffered range 0..{len}")]
    SeekOutOfRange {
        /// Requested cursor position.
        target: i64,
        /// Retained length at the time of the seek.
        len: usize,
    },
}

/// A cue setting value that was rejected. The cue keeps its previous value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CueError {
    /// The value does not follow the setting's grammar.
    #[error("malformed {setting} value '{value}'")]
    Malformed {
        /// Setting keyword, such as `line`.
        setting: &'static str,
        /// The rejected value as given.
        value: BString,
    },
    /// The value parsed but lies outside the allowed range.
    #[error("{setting} value {value} out of range")]
    OutOfRange {
        /// Setting keyword, such as `size`.
        setting: &'static str,
        /// The parsed number.
        value: i32,
    },
}

impl CueError {
    pub(crate) fn malformed(setting: &'static str, value: &[u8]) -> Self {
        CueError::Malformed {
            setting,
            value: BString::from(value),
        }
    }
}
