//! Decoder error taxonomy
//!
//! Every decoder in the crate returns one of these types. A failed decode never yields a
//! partial record; the orchestration layer (`areas`) attaches the file path or object ID
//! as `anyhow` context before surfacing it.

use thiserror::Error;

/// Structural problems found while decoding the index or an object
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Index buffer is too short to hold the 12-byte header
    #[error("index header truncated: {len} bytes available, 12 required")]
    TruncatedHeader {
        /// Length of the buffer
        len: usize,
    },

    /// First four bytes of the index are not `DIRC`
    #[error("invalid index signature: {found:?}")]
    InvalidSignature {
        /// Bytes found in place of the signature
        found: [u8; 4],
    },

    /// Index version is not one this decoder understands
    #[error("unsupported index version: {version}")]
    UnsupportedVersion {
        /// Version read from the header
        version: u32,
    },

    /// An entry runs past the end of the buffer
    #[error("index entry #{entry} truncated at byte offset {offset}")]
    TruncatedEntry {
        /// Zero-based position of the entry
        entry: usize,
        /// Byte offset where the entry starts
        offset: usize,
    },

    /// An entry path is longer than the configured maximum
    #[error("index entry #{entry} at byte offset {offset}: path of {len} bytes exceeds {max}")]
    NameTooLong {
        /// Zero-based position of the entry
        entry: usize,
        /// Byte offset where the entry starts
        offset: usize,
        /// Scanned path length
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Object envelope is not `<type> <size>\0`
    #[error("malformed object header: {reason}")]
    MalformedHeader {
        /// What was wrong with it
        reason: String,
    },

    /// Tree content ends in the middle of an entry
    #[error("tree entry truncated at byte offset {offset}")]
    TruncatedTreeEntry {
        /// Byte offset where the entry starts
        offset: usize,
    },
}

impl FormatError {
    pub(crate) fn malformed_header(reason: impl Into<String>) -> Self {
        FormatError::MalformedHeader {
            reason: reason.into(),
        }
    }
}

/// Failure of a full loose-object decode
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The decompression capability rejected the input; nothing was parsed
    #[error("unable to decompress object content")]
    Decompression(#[source] std::io::Error),
}

impl DecodeError {
    /// The structural error, if this is one
    pub fn as_format(&self) -> Option<&FormatError> {
        match self {
            DecodeError::Format(err) => Some(err),
            DecodeError::Decompression(_) => None,
        }
    }
}

/// Declared envelope size disagrees with the actual content length
///
/// Informational only; decoding never fails because of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrityWarning {
    pub declared: u64,
    pub actual: u64,
}

impl std::fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "declared size {} does not match content length {}",
            self.declared, self.actual
        )
    }
}
