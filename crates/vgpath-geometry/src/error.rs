//! Errors raised while decoding raw path data.
//!
//! Geometry processing itself never fails: degenerate input degrades by
//! skipping or truncating output. Only the boundary where untrusted segment
//! bytes and coordinates enter the engine is fallible.

use crate::Opcode;

/// Errors that can occur when building a [`RawPath`](crate::RawPath).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathDataError {
    /// The segment byte does not name an OpenVG path command.
    #[error("unknown path segment byte 0x{0:02x}")]
    UnknownSegment(u8),

    /// The coordinate buffer ran out before a segment's operands.
    #[error(
        "segment {index} ({opcode:?}) needs {expected} coordinates but only {available} remain"
    )]
    MissingCoordinates {
        index: usize,
        opcode: Opcode,
        expected: usize,
        available: usize,
    },

    /// Coordinates remain after the last segment was decoded.
    #[error("{0} coordinates left over after the last segment")]
    TrailingCoordinates(usize),
}

/// Result type for path data operations.
pub type PathDataResult<T> = Result<T, PathDataError>;
