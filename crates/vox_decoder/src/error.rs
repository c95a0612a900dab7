//! # Decode Error Types
//!
//! Every failure a decode pass can produce. A decode either returns a full
//! scene or one of these; there is no partial result.

use thiserror::Error;

/// Errors that can occur while decoding a VOX container.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The file does not start with the `VOX ` magic tag.
    #[error("bad magic: expected 'VOX ', found {found:?}")]
    BadMagic {
        /// The four bytes that were found instead.
        found: [u8; 4],
    },

    /// The mandatory top-level `MAIN` chunk is missing or mislabeled.
    #[error("missing or invalid MAIN chunk")]
    BadContainer,

    /// A read, peek or skip ran past the end of the buffer.
    #[error("truncated input at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        /// Cursor position at the failing read.
        offset: usize,
        /// Bytes requested.
        needed: usize,
        /// Bytes that were actually left.
        available: usize,
    },

    /// A chunk appeared where its required companion was expected.
    #[error("malformed chunk sequence: expected {expected}, found {found}")]
    MalformedChunkSequence {
        /// Tag that the format requires here.
        expected: &'static str,
        /// What was actually read.
        found: String,
    },

    /// A `MATL` numeric property could not be parsed as a float.
    #[error("bad numeric value {value:?} for material key {key}")]
    BadNumericField {
        /// Material property key.
        key: String,
        /// Raw value text.
        value: String,
    },

    /// More `SIZE` chunks than the `PACK` chunk declared.
    #[error("model count exceeded: file declared {declared} models")]
    ModelCountExceeded {
        /// Model count from `PACK` (or 1 when absent).
        declared: u32,
    },

    /// An `XYZI` chunk declared more voxels than the configured limit.
    #[error("voxel limit exceeded: {count} voxels, limit {limit}")]
    VoxelLimitExceeded {
        /// Voxel count stored in the chunk.
        count: u32,
        /// Configured maximum.
        limit: u32,
    },

    /// Reading the input file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoder configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DecodeError {
    /// Returns true for failures caused by running out of input.
    #[inline]
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
