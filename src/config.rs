//! Limits shared by the encoder and the decoder.

/// Default maximum nesting depth of composite values.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Bounds applied while decoding.
///
/// The encoder honours the same bounds, so anything it accepts decodes again
/// under equal limits.
///
/// The wire format itself caps every declared length at `u32::MAX`; these
/// limits let a caller reject smaller forged lengths and deep nesting before
/// they cost memory or stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Composites nested deeper than this are rejected. A top-level tuple is depth 1.
    pub max_depth: usize,
    /// Largest declared text/bytes/integer byte length or tuple/set element count.
    pub max_length: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_length: u32::MAX as usize,
        }
    }
}

impl DecodeLimits {
    /// Limits that only enforce what the wire format can express.
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
            max_length: u32::MAX as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let limits = DecodeLimits::default();
        assert_eq!(limits.max_depth, 64);
        assert_eq!(limits.max_length, u32::MAX as usize);
    }
}
