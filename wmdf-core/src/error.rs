//! Error types for wmdf operations.
//!
//! This module provides the error type shared by every layer of the
//! converter: container framing, color block decoding, grid decoding and
//! render-time colorway selection.

use thiserror::Error;

/// The main error type for wmdf operations.
#[derive(Debug, Error)]
pub enum WmdfError {
    /// Ran out of bytes while reading a fixed-size field.
    #[error("Unexpected end of data at offset {offset}: expected {expected} more bytes")]
    UnexpectedEof {
        /// Absolute file offset where the read started.
        offset: usize,
        /// Number of bytes that were expected but not available.
        expected: usize,
    },

    /// The file header (color block offset) is unusable.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// The `Q` color block does not follow its tagged record layout.
    #[error("Malformed color block (segment 'Q') at offset {offset}: {message}")]
    MalformedColorBlock {
        /// Absolute file offset of the offending byte.
        offset: usize,
        /// Description of the mismatch.
        message: String,
    },

    /// A recognized segment declares more payload than the file holds.
    #[error(
        "Truncated segment '{id}' at offset {offset}: payload needs {needed} bytes, {available} available"
    )]
    TruncatedSegment {
        /// Segment id.
        id: char,
        /// Absolute file offset of the segment prologue.
        offset: usize,
        /// Declared payload length.
        needed: usize,
        /// Bytes remaining after the prologue.
        available: usize,
    },

    /// A segment required for conversion is absent.
    #[error("Missing required segment '{id}'")]
    MissingSegment {
        /// Segment id.
        id: char,
    },

    /// A bit-pattern grid cannot be represented.
    #[error("Invalid grid in segment '{id}' at offset {offset}: {message}")]
    InvalidGrid {
        /// Segment id.
        id: char,
        /// Absolute file offset of the segment prologue.
        offset: usize,
        /// Description of the problem.
        message: String,
    },

    /// An index array uses an entity width we cannot interpret.
    #[error("Unsupported entity size {size} in segment '{id}' at offset {offset}")]
    UnsupportedEntitySize {
        /// Segment id.
        id: char,
        /// Absolute file offset of the segment prologue.
        offset: usize,
        /// Declared entity size.
        size: usize,
    },

    /// A colorway was requested that the file does not define.
    #[error("Colorway {index} out of range: file defines {available}")]
    ColorwayOutOfRange {
        /// Requested colorway (0-based).
        index: usize,
        /// Number of colorways available.
        available: usize,
    },
}

/// Result type alias for wmdf operations.
pub type Result<T> = std::result::Result<T, WmdfError>;

impl WmdfError {
    /// Create an unexpected EOF error.
    pub fn unexpected_eof(offset: usize, expected: usize) -> Self {
        Self::UnexpectedEof { offset, expected }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create a malformed color block error.
    pub fn malformed_color_block(offset: usize, message: impl Into<String>) -> Self {
        Self::MalformedColorBlock {
            offset,
            message: message.into(),
        }
    }

    /// Create a truncated segment error.
    pub fn truncated_segment(id: char, offset: usize, needed: usize, available: usize) -> Self {
        Self::TruncatedSegment {
            id,
            offset,
            needed,
            available,
        }
    }

    /// Create a missing segment error.
    pub fn missing_segment(id: char) -> Self {
        Self::MissingSegment { id }
    }

    /// Create an invalid grid error.
    pub fn invalid_grid(id: char, offset: usize, message: impl Into<String>) -> Self {
        Self::InvalidGrid {
            id,
            offset,
            message: message.into(),
        }
    }

    /// Create an unsupported entity size error.
    pub fn unsupported_entity_size(id: char, offset: usize, size: usize) -> Self {
        Self::UnsupportedEntitySize { id, offset, size }
    }

    /// Create a colorway out of range error.
    pub fn colorway_out_of_range(index: usize, available: usize) -> Self {
        Self::ColorwayOutOfRange { index, available }
    }

    /// Check whether this error came from the color block.
    pub fn is_color_block_error(&self) -> bool {
        matches!(self, Self::MalformedColorBlock { .. })
    }
}
