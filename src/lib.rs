//! Frostpack — a compact binary codec for immutable values.
//!
//! The codec carries a closed, acyclic family of values across a
//! language/runtime boundary. Nothing it decodes can be mutated or executed,
//! so untrusted input is safe to decode.
//!
//! # Architecture
//!
//! - **`codec`** — Tag registry, classifier, encoder and decoder
//! - **`types`** — The `Value` enum and its composite payloads
//! - **`config`** — Decode limits for untrusted input
//! - **`error`** — `CodecError`
//!
//! ```
//! use frostpack::Value;
//!
//! let value = Value::tuple([Value::from("a"), Value::from(5)]);
//! let bytes = frostpack::encode(&value).unwrap();
//! assert_eq!(&bytes[..], &[0x0F, 0x0A, b'a', 0x55]);
//! assert_eq!(frostpack::decode(&bytes).unwrap(), value);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod types;

use bytes::Bytes;

pub use codec::{Codec, Shape};
pub use config::DecodeLimits;
pub use error::CodecError;
pub use types::{Complex, Slice, Value, ValueSet};

/// Encodes a value. Fails without output if any part of it is unsupported.
pub fn encode(value: &Value) -> Result<Bytes, CodecError> {
    Codec::new().encode(value)
}

/// Decodes one value that must span the whole input.
pub fn decode(input: &[u8]) -> Result<Value, CodecError> {
    Codec::new().decode(input)
}

/// Decodes one value at `offset`, returning it with the number of bytes consumed.
pub fn decode_at(input: &[u8], offset: usize) -> Result<(Value, usize), CodecError> {
    Codec::new().decode_at(input, offset)
}

/// Whether `encode` would accept the value.
pub fn is_encodable(value: &Value) -> bool {
    codec::is_encodable(value)
}
