//! Binary codec for immutable values.
//!
//! Each value is a one-byte tag followed by a payload whose layout the tag
//! determines. Small integers live entirely in the tag byte. All multi-byte
//! numbers are big-endian.

pub mod classify;
pub mod decode;
pub mod encode;
pub mod tag;

pub use classify::{classify, classify_with, is_encodable, is_encodable_with};
pub use decode::decode_value;
pub use encode::{encode_value, encode_value_with};
pub use tag::Shape;

use bytes::{Bytes, BytesMut};

use crate::config::DecodeLimits;
use crate::error::CodecError;
use crate::types::Value;

/// Entry point for encoding and decoding with a given set of limits.
///
/// The limits bound both directions: the encoder refuses any value that a
/// decoder with the same limits would reject. `Codec` holds no state besides its limits and can be shared freely
/// between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Codec {
    limits: DecodeLimits,
}

impl Codec {
    /// Creates a codec with the default decode limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a codec with the given decode limits.
    pub fn with_limits(limits: DecodeLimits) -> Self {
        Self { limits }
    }

    /// Sets the maximum nesting depth accepted when encoding and decoding.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.limits.max_depth = depth;
        self
    }

    /// Sets the largest length accepted when encoding and decoding.
    pub fn max_length(mut self, len: usize) -> Self {
        self.limits.max_length = len;
        self
    }

    /// Returns the limits applied when encoding and decoding.
    pub fn limits(&self) -> &DecodeLimits {
        &self.limits
    }

    /// Encodes a value into a fresh buffer.
    pub fn encode(&self, value: &Value) -> Result<Bytes, CodecError> {
        let mut buf = BytesMut::new();
        self.encode_into(&mut buf, value)?;
        Ok(buf.freeze())
    }

    /// Appends the encoding of a value to `buf`. On error nothing is appended.
    pub fn encode_into(&self, buf: &mut BytesMut, value: &Value) -> Result<(), CodecError> {
        let start = buf.len();
        match encode_value_with(buf, value, &self.limits) {
            Ok(()) => {
                tracing::trace!(len = buf.len() - start, "encoded value");
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "value rejected by classifier");
                Err(e)
            }
        }
    }

    /// Decodes exactly one value that must span the whole input.
    pub fn decode(&self, input: &[u8]) -> Result<Value, CodecError> {
        let (value, consumed) = self.decode_at(input, 0)?;
        if consumed != input.len() {
            let e = CodecError::TrailingBytes {
                consumed,
                total: input.len(),
            };
            tracing::debug!(error = %e, "trailing bytes after value");
            return Err(e);
        }
        Ok(value)
    }

    /// Decodes one value at `offset`, returning it with the number of bytes consumed.
    pub fn decode_at(&self, input: &[u8], offset: usize) -> Result<(Value, usize), CodecError> {
        match decode_value(input, offset, &self.limits) {
            Ok((value, consumed)) => {
                tracing::trace!(offset, consumed, "decoded value");
                Ok((value, consumed))
            }
            Err(e) => {
                tracing::debug!(
                    offset = ?e.offset(),
                    tag = ?e.tag(),
                    error = %e,
                    "decode failed"
                );
                Err(e)
            }
        }
    }

    /// Whether `encode` would accept the value.
    pub fn is_encodable(&self, value: &Value) -> bool {
        is_encodable_with(value, &self.limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_decode_rejects_trailing_bytes() {
        let codec = Codec::new();
        assert_eq!(
            codec.decode(&[0x57, 0x00]),
            Err(CodecError::TrailingBytes {
                consumed: 1,
                total: 2
            })
        );
    }

    #[test]
    fn builder_sets_limits() {
        let codec = Codec::new().max_depth(3).max_length(10);
        assert_eq!(codec.limits().max_depth, 3);
        assert_eq!(codec.limits().max_length, 10);
    }

    fn nested(depth: usize) -> Value {
        (0..depth).fold(Value::from(0), |inner, _| Value::tuple([inner]))
    }

    #[test]
    fn limits_bound_both_directions() {
        let value = nested(65);
        let default = Codec::new();
        assert!(!default.is_encodable(&value));
        assert!(matches!(
            default.encode(&value),
            Err(CodecError::Unsupported { .. })
        ));

        let deep = Codec::new().max_depth(65);
        assert!(deep.is_encodable(&value));
        let bytes = deep.encode(&value).unwrap();
        assert_eq!(deep.decode(&bytes), Ok(value));
        assert!(matches!(
            default.decode(&bytes),
            Err(CodecError::LimitExceeded { .. })
        ));
    }

    #[test]
    fn encode_into_appends() {
        let codec = Codec::new();
        let mut buf = BytesMut::new();
        codec.encode_into(&mut buf, &Value::from(1)).unwrap();
        codec.encode_into(&mut buf, &Value::from("a")).unwrap();
        assert_eq!(&buf[..], &[0x51, 0x0A, b'a']);

        let (first, n) = codec.decode_at(&buf, 0).unwrap();
        let (second, m) = codec.decode_at(&buf, n).unwrap();
        assert_eq!((first, second), (Value::from(1), Value::from("a")));
        assert_eq!(n + m, buf.len());
    }
}
