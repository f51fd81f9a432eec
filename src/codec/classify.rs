//! Value classification: decides which shape a value is encoded as, and
//! whether it can be encoded at all.

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use super::tag::{IMMEDIATE_MAX, IMMEDIATE_MIN, Shape};
use crate::config::DecodeLimits;
use crate::error::CodecError;
use crate::types::{Slice, Value};

/// Largest length or element count any prefix can carry.
const MAX_WIRE_LEN: usize = u32::MAX as usize;

/// Returns the shape of a single value without looking at its elements or
/// checking that it is encodable.
pub fn shape_of(value: &Value) -> Shape {
    match value {
        Value::None => Shape::None,
        Value::NotApplicable => Shape::NotApplicable,
        Value::OpenEnded => Shape::OpenEnded,
        Value::Text(s) if s.is_empty() => Shape::EmptyText,
        Value::Tuple(items) if items.is_empty() => Shape::EmptyTuple,
        Value::Bytes(b) if b.is_empty() => Shape::EmptyBytes,
        Value::Boolean(true) => Shape::True,
        Value::Boolean(false) => Shape::False,
        Value::Integer(i) => match i.to_i64() {
            Some(v) if (IMMEDIATE_MIN..=IMMEDIATE_MAX).contains(&v) => Shape::Immediate(v as i16),
            _ => Shape::ExtendedInt,
        },
        Value::Float(_) => Shape::Float,
        Value::Complex(_) => Shape::Complex,
        Value::Text(_) => Shape::Text,
        Value::Bytes(_) => Shape::Bytes,
        Value::Tuple(_) => Shape::Tuple,
        Value::Set(_) => Shape::Set,
        Value::Slice(_) => Shape::Slice,
    }
}

/// Classifies a value against the default limits, recursively verifying that
/// every element of a composite is encodable too.
pub fn classify(value: &Value) -> Result<Shape, CodecError> {
    classify_with(value, &DecodeLimits::default())
}

/// Classifies a value, rejecting anything a decoder with the same limits
/// would refuse: nesting deeper than `max_depth` or a declared length above
/// `max_length`.
pub fn classify_with(value: &Value, limits: &DecodeLimits) -> Result<Shape, CodecError> {
    Classifier {
        limits,
        max_len: limits.max_length.min(MAX_WIRE_LEN),
    }
    .classify(value, 0)
}

/// Whether `classify` would accept the value.
pub fn is_encodable(value: &Value) -> bool {
    classify(value).is_ok()
}

/// Whether `classify_with` would accept the value.
pub fn is_encodable_with(value: &Value, limits: &DecodeLimits) -> bool {
    classify_with(value, limits).is_ok()
}

struct Classifier<'l> {
    limits: &'l DecodeLimits,
    max_len: usize,
}

impl Classifier<'_> {
    /// `depth` counts enclosing composites, the way the decoder does: a
    /// non-empty tuple, a set or a slice each add one level.
    fn classify(&self, value: &Value, depth: usize) -> Result<Shape, CodecError> {
        let shape = shape_of(value);
        match value {
            Value::Integer(i) if shape == Shape::ExtendedInt => self.check_int(i)?,
            Value::Text(s) => self.check_len("text", s.len())?,
            Value::Bytes(b) => self.check_len("bytes", b.len())?,
            Value::Tuple(items) if !items.is_empty() => {
                let depth = self.enter(depth)?;
                self.check_len("tuple", items.len())?;
                for item in items {
                    self.classify(item, depth)?;
                }
            }
            Value::Set(items) => {
                let depth = self.enter(depth)?;
                self.check_len("set", items.len())?;
                for item in items {
                    if !item.is_hashable() {
                        return Err(CodecError::unsupported(format!(
                            "unhashable set element: {item}"
                        )));
                    }
                    self.classify(item, depth)?;
                }
            }
            Value::Slice(slice) => {
                let depth = self.enter(depth)?;
                self.classify_slice(slice, depth)?;
            }
            _ => {}
        }
        Ok(shape)
    }

    fn classify_slice(&self, slice: &Slice, depth: usize) -> Result<(), CodecError> {
        for (name, bound) in [
            ("start", &slice.start),
            ("stop", &slice.stop),
            ("step", &slice.step),
        ] {
            match bound {
                Value::None => {}
                Value::Integer(_) => {
                    self.classify(bound, depth)?;
                }
                other => {
                    return Err(CodecError::unsupported(format!(
                        "slice {name} must be None or an integer, got: {other}"
                    )));
                }
            }
        }
        Ok(())
    }

    fn enter(&self, depth: usize) -> Result<usize, CodecError> {
        let depth = depth + 1;
        if depth > self.limits.max_depth {
            return Err(CodecError::unsupported(format!(
                "nesting depth exceeds {}",
                self.limits.max_depth
            )));
        }
        Ok(depth)
    }

    fn check_int(&self, i: &BigInt) -> Result<(), CodecError> {
        // Two's-complement width is at most bits / 8 + 1; only measure it
        // exactly when that bound is over the limit.
        let bound = i.bits() / 8 + 1;
        if bound <= self.max_len as u64 {
            return Ok(());
        }
        if bound > MAX_WIRE_LEN as u64 + 1 {
            return Err(CodecError::unsupported(format!(
                "integer of {} bits is too wide",
                i.bits()
            )));
        }
        self.check_len("integer", i.to_signed_bytes_be().len())
    }

    fn check_len(&self, what: &str, len: usize) -> Result<(), CodecError> {
        if len > self.max_len {
            Err(CodecError::unsupported(format!(
                "{what} of length {len} exceeds {}",
                self.max_len
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Complex;

    #[test]
    fn singletons() {
        assert_eq!(classify(&Value::None), Ok(Shape::None));
        assert_eq!(classify(&Value::NotApplicable), Ok(Shape::NotApplicable));
        assert_eq!(classify(&Value::OpenEnded), Ok(Shape::OpenEnded));
        assert_eq!(classify(&Value::from("")), Ok(Shape::EmptyText));
        assert_eq!(classify(&Value::Tuple(vec![])), Ok(Shape::EmptyTuple));
        assert_eq!(classify(&Value::Bytes(vec![])), Ok(Shape::EmptyBytes));
    }

    #[test]
    fn booleans_are_not_integers() {
        assert_eq!(classify(&Value::from(true)), Ok(Shape::True));
        assert_eq!(classify(&Value::from(false)), Ok(Shape::False));
    }

    #[test]
    fn integer_ranges() {
        assert_eq!(classify(&Value::from(-48)), Ok(Shape::Immediate(-48)));
        assert_eq!(classify(&Value::from(159)), Ok(Shape::Immediate(159)));
        assert_eq!(classify(&Value::from(-49)), Ok(Shape::ExtendedInt));
        assert_eq!(classify(&Value::from(160)), Ok(Shape::ExtendedInt));
        let huge: BigInt = BigInt::from(1i32) << 200u32;
        assert_eq!(classify(&Value::from(huge)), Ok(Shape::ExtendedInt));
    }

    #[test]
    fn scalars() {
        assert_eq!(classify(&Value::from(1.5)), Ok(Shape::Float));
        assert_eq!(classify(&Value::from(Complex::new(1.0, 2.0))), Ok(Shape::Complex));
        assert_eq!(classify(&Value::from("abc")), Ok(Shape::Text));
        assert_eq!(classify(&Value::from(vec![1u8, 2])), Ok(Shape::Bytes));
    }

    #[test]
    fn composites_recurse() {
        let nested = Value::tuple([
            Value::tuple([Value::from(1)]),
            Value::set([Value::from("a")]),
            Value::slice(1, Value::None, -1),
        ]);
        assert_eq!(classify(&nested), Ok(Shape::Tuple));
    }

    #[test]
    fn slice_bounds_must_be_integers() {
        let bad = Value::slice("a", 2, Value::None);
        assert!(matches!(classify(&bad), Err(CodecError::Unsupported { .. })));
        let float_step = Value::slice(0, 10, 0.5);
        assert!(!is_encodable(&float_step));
    }

    #[test]
    fn bad_element_fails_whole_tuple() {
        let bad = Value::tuple([Value::from(1), Value::slice(true, 1, 1)]);
        assert!(matches!(classify(&bad), Err(CodecError::Unsupported { .. })));
    }

    #[test]
    fn sets_reject_unhashable_elements() {
        let bad = Value::set([Value::slice(1, 2, 3)]);
        assert!(!is_encodable(&bad));
        let nested = Value::set([Value::tuple([Value::slice(1, 2, 3)])]);
        assert!(!is_encodable(&nested));
        let ok = Value::set([Value::set([Value::from(1)]), Value::from("x")]);
        assert!(is_encodable(&ok));
    }

    fn nested_tuple(depth: usize) -> Value {
        (0..depth).fold(Value::from(1), |inner, _| Value::tuple([inner]))
    }

    #[test]
    fn depth_matches_default_decode_limit() {
        assert!(is_encodable(&nested_tuple(64)));
        let err = classify(&nested_tuple(65)).unwrap_err();
        assert!(matches!(err, CodecError::Unsupported { .. }));
    }

    #[test]
    fn empty_tuples_do_not_add_depth() {
        let limits = DecodeLimits {
            max_depth: 1,
            ..DecodeLimits::default()
        };
        let value = Value::tuple([Value::Tuple(vec![])]);
        assert!(is_encodable_with(&value, &limits));
        let slice_in_tuple = Value::tuple([Value::slice(1, 2, 3)]);
        assert!(!is_encodable_with(&slice_in_tuple, &limits));
    }

    #[test]
    fn length_limit_applies_to_integers_and_text() {
        let limits = DecodeLimits {
            max_length: 4,
            ..DecodeLimits::default()
        };
        assert!(is_encodable_with(&Value::from(i64::from(i32::MIN)), &limits));
        assert!(!is_encodable_with(&Value::from(i64::MAX), &limits));
        assert!(is_encodable_with(&Value::from("abcd"), &limits));
        assert!(!is_encodable_with(&Value::from("abcde"), &limits));
    }
}
