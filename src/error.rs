//! Error types for the codec.

/// Errors that can occur while classifying, encoding or decoding values.
///
/// Decode errors carry the offset of the value that failed and, once it has
/// been read, its tag byte.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("unsupported value: {reason}")]
    Unsupported { reason: String },

    #[error("truncated input at offset {offset}{}: need {needed} bytes but only {remaining} remaining", describe_tag(.tag))]
    Truncated {
        tag: Option<u8>,
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("unknown tag 0x{tag:02X} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },

    #[error("malformed payload for tag 0x{tag:02X} at offset {offset}: {reason}")]
    Malformed {
        tag: u8,
        offset: usize,
        reason: String,
    },

    #[error("trailing bytes: decoded {consumed} of {total} bytes")]
    TrailingBytes { consumed: usize, total: usize },

    #[error("decode limit exceeded for tag 0x{tag:02X} at offset {offset}: {reason}")]
    LimitExceeded {
        tag: u8,
        offset: usize,
        reason: String,
    },
}

impl CodecError {
    /// Wraps any displayable reason as an unsupported-value error.
    pub fn unsupported(reason: impl std::fmt::Display) -> Self {
        Self::Unsupported {
            reason: reason.to_string(),
        }
    }

    /// Byte offset of the failing value, for decode errors.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Truncated { offset, .. }
            | Self::UnknownTag { offset, .. }
            | Self::Malformed { offset, .. }
            | Self::LimitExceeded { offset, .. } => Some(*offset),
            Self::TrailingBytes { consumed, .. } => Some(*consumed),
            Self::Unsupported { .. } => None,
        }
    }

    /// Tag byte of the failing value, when one was read.
    pub fn tag(&self) -> Option<u8> {
        match self {
            Self::Truncated { tag, .. } => *tag,
            Self::UnknownTag { tag, .. }
            | Self::Malformed { tag, .. }
            | Self::LimitExceeded { tag, .. } => Some(*tag),
            Self::TrailingBytes { .. } | Self::Unsupported { .. } => None,
        }
    }
}

fn describe_tag(tag: &Option<u8>) -> String {
    tag.map(|t| format!(" (tag 0x{t:02X})")).unwrap_or_default()
}
