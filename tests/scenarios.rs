//! End-to-end scenarios through the public API.

use std::collections::BTreeSet;

use num_bigint::BigInt;

use frostpack::{Codec, CodecError, Value, decode, decode_at, encode, is_encodable};

#[test]
fn none_is_a_single_byte() {
    let bytes = encode(&Value::None).unwrap();
    assert_eq!(&bytes[..], &[0x00]);
    assert_eq!(decode_at(&bytes, 0), Ok((Value::None, 1)));
}

#[test]
fn small_and_large_integers() {
    let seven = encode(&Value::from(7)).unwrap();
    assert_eq!(seven.len(), 1);
    assert_eq!(decode(&seven), Ok(Value::from(7)));

    let thousand = encode(&Value::from(1000)).unwrap();
    assert_eq!(&thousand[..], &[0x12, 0x02, 0x03, 0xE8]);
    assert_eq!(decode(&thousand), Ok(Value::from(1000)));
}

#[test]
fn integers_around_32_bits() {
    for i in [
        (1i64 << 31) - 1,
        1i64 << 31,
        -(1i64 << 31),
        -(1i64 << 31) - 1,
        1i64 << 32,
    ] {
        let bytes = encode(&Value::from(i)).unwrap();
        let width = BigInt::from(i).to_signed_bytes_be().len();
        assert_eq!(usize::from(bytes[1]), width, "failed for {i}");
        assert_eq!(decode(&bytes), Ok(Value::from(i)), "failed for {i}");
    }
    let huge: BigInt = BigInt::from(3i32) << 500u32;
    let bytes = encode(&Value::from(huge.clone())).unwrap();
    assert_eq!(decode(&bytes), Ok(Value::from(huge)));
}

#[test]
fn float_is_nine_bytes() {
    let bytes = encode(&Value::from(3.25)).unwrap();
    assert_eq!(bytes.len(), 9);
    assert_eq!(decode(&bytes), Ok(Value::from(3.25)));
}

#[test]
fn pair_tuple_has_no_delimiters() {
    let value = Value::tuple([Value::from("a"), Value::from(5)]);
    let bytes = encode(&value).unwrap();
    let mut expected = vec![0x0F];
    expected.extend_from_slice(&encode(&Value::from("a")).unwrap());
    expected.extend_from_slice(&encode(&Value::from(5)).unwrap());
    assert_eq!(&bytes[..], &expected[..]);
    assert_eq!(decode(&bytes), Ok(value));
}

#[test]
fn set_membership_survives() {
    let value = Value::set([Value::from(1), Value::from(2), Value::from(3)]);
    let decoded = decode(&encode(&value).unwrap()).unwrap();
    let expected: BTreeSet<Value> = [1, 2, 3].into_iter().map(Value::from).collect();
    assert_eq!(decoded.as_set(), Some(&expected));
}

#[test]
fn set_decodes_in_any_element_order() {
    // Elements 3, 1, 2 written out of sorted order.
    let bytes = [0x16, 0, 0, 0, 3, 0x53, 0x51, 0x52];
    let value = Value::set([Value::from(1), Value::from(2), Value::from(3)]);
    assert_eq!(decode(&bytes), Ok(value));
}

#[test]
fn nested_composites() {
    let value = Value::tuple([
        Value::tuple([Value::from(1), Value::tuple([Value::from("deep")])]),
        Value::set([Value::from("x"), Value::tuple([Value::from(2.5)])]),
        Value::slice(Value::None, 100, 2),
    ]);
    assert!(is_encodable(&value));
    assert_eq!(decode(&encode(&value).unwrap()), Ok(value));
}

#[test]
fn unsupported_element_fails_whole_call() {
    let value = Value::tuple([Value::from(1), Value::slice(1.5, 2, 3)]);
    assert!(!is_encodable(&value));
    assert!(matches!(encode(&value), Err(CodecError::Unsupported { .. })));
}

#[test]
fn trailing_bytes_are_reported() {
    let mut bytes = encode(&Value::from("abc")).unwrap().to_vec();
    bytes.push(0x00);
    assert_eq!(
        decode(&bytes),
        Err(CodecError::TrailingBytes {
            consumed: 4,
            total: 5
        })
    );
}

#[test]
fn unknown_tag_reports_offset() {
    let err = decode(&[0x10, 0x50, 0x51, 0xFE]).unwrap_err();
    assert_eq!(err, CodecError::UnknownTag { tag: 0xFE, offset: 3 });
    assert_eq!(err.tag(), Some(0xFE));
    assert_eq!(err.offset(), Some(3));
}

#[test]
fn configured_limits_apply() {
    let codec = Codec::new().max_depth(1);
    let nested = encode(&Value::tuple([Value::tuple([Value::from(1)])])).unwrap();
    assert!(matches!(
        codec.decode(&nested),
        Err(CodecError::LimitExceeded { .. })
    ));
    assert!(decode(&nested).is_ok());
}

fn nested_tuple(depth: usize) -> Value {
    (0..depth).fold(Value::from(1), |inner, _| Value::tuple([inner]))
}

#[test]
fn everything_encodable_decodes_at_default_depth() {
    let deepest = nested_tuple(64);
    let bytes = encode(&deepest).unwrap();
    assert_eq!(decode(&bytes), Ok(deepest));

    let too_deep = nested_tuple(65);
    assert!(!is_encodable(&too_deep));
    assert!(matches!(
        encode(&too_deep),
        Err(CodecError::Unsupported { .. })
    ));

    let codec = Codec::new().max_depth(65);
    let bytes = codec.encode(&too_deep).unwrap();
    assert_eq!(codec.decode(&bytes), Ok(too_deep));
}
