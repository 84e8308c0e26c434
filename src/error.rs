//! Error types for header decode and encode

use thiserror::Error;

/// Per-frame decode/encode failure.
///
/// None of these are fatal to the caller's process; the decode-chain driver
/// records the failing kind and keeps the layers decoded so far.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerError {
    /// A structural invariant of the header was violated (e.g. nonzero
    /// reserved bits in the PBB I-TAG).
    #[error("malformed header: {reason}")]
    MalformedHeader { reason: &'static str },

    /// A declared or implied length exceeds the bytes available.
    #[error("truncated header: need {needed} bytes, have {available}")]
    TruncatedHeader { needed: usize, available: usize },

    /// Wireless-specific-information subtype outside the known set {1, 4}.
    #[error("unknown wireless specific information subtype {0}")]
    UnknownWirelessInfo(u8),

    /// CAPWAP preamble type outside the known set {0, 1}.
    #[error("unknown CAPWAP preamble type {0}")]
    UnknownCapwapType(u8),

    /// The trailing frame check sequence did not match the computed CRC-32.
    #[error("FCS mismatch: frame carries {expected:#010x}, computed {computed:#010x}")]
    FcsMismatch { expected: u32, computed: u32 },

    /// The capture layer already flagged this frame as bad.
    #[error("frame flagged corrupt by the capture layer")]
    CorruptFrame,

    /// Encode-time precondition on the serialize buffer failed.
    #[error("serialize buffer too short: need {needed} bytes, have {available}")]
    BufferTooShort { needed: usize, available: usize },
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, LayerError>;
