//! Encoding: `Value` → bytes.

use bytes::{BufMut, BytesMut};

use super::classify::{classify_with, shape_of};
use super::tag::{self, Prefix, Shape, TagKind};
use crate::config::DecodeLimits;
use crate::error::CodecError;
use crate::types::{Slice, Value, ValueSet};

/// Encodes a value into the buffer, accepting only what a decoder with the
/// default limits reads back.
///
/// The whole value is classified before anything is written, so on error the
/// buffer is left untouched.
pub fn encode_value(buf: &mut BytesMut, value: &Value) -> Result<(), CodecError> {
    encode_value_with(buf, value, &DecodeLimits::default())
}

/// Encodes a value into the buffer, accepting only what a decoder with
/// `limits` reads back.
pub fn encode_value_with(
    buf: &mut BytesMut,
    value: &Value,
    limits: &DecodeLimits,
) -> Result<(), CodecError> {
    classify_with(value, limits)?;
    write_value(buf, value);
    Ok(())
}

/// Writes an already classified value.
fn write_value(buf: &mut BytesMut, value: &Value) {
    let shape = shape_of(value);
    match value {
        Value::None
        | Value::NotApplicable
        | Value::OpenEnded
        | Value::Boolean(_) => buf.put_u8(tag::tag_for_shape(shape, 0)),
        Value::Integer(i) => match shape {
            Shape::Immediate(_) => buf.put_u8(tag::tag_for_shape(shape, 0)),
            _ => {
                let data = i.to_signed_bytes_be();
                encode_header(buf, shape, data.len());
                buf.put_slice(&data);
            }
        },
        Value::Float(f) => {
            buf.put_u8(tag::FLOAT);
            buf.put_f64(*f);
        }
        Value::Complex(c) => {
            buf.put_u8(tag::COMPLEX);
            buf.put_f64(c.re);
            buf.put_f64(c.im);
        }
        Value::Text(s) => {
            encode_header(buf, shape, s.len());
            buf.put_slice(s.as_bytes());
        }
        Value::Bytes(b) => {
            encode_header(buf, shape, b.len());
            buf.put_slice(b);
        }
        Value::Tuple(items) => write_tuple(buf, shape, items),
        Value::Set(items) => write_set(buf, items),
        Value::Slice(slice) => write_slice(buf, slice),
    }
}

/// Writes a tag and whatever length prefix the tag calls for.
///
/// Empty shapes and short forms carry no prefix. The width comes from the
/// same inverse lookup the decoder uses.
fn encode_header(buf: &mut BytesMut, shape: Shape, len: usize) {
    let tag_byte = tag::tag_for_shape(shape, len);
    buf.put_u8(tag_byte);
    match tag::shape_for_tag(tag_byte) {
        Some(TagKind::Shape(_, Prefix::U8)) => buf.put_u8(len as u8),
        Some(TagKind::Shape(_, Prefix::U32)) => buf.put_u32(len as u32),
        _ => {}
    }
}

fn write_tuple(buf: &mut BytesMut, shape: Shape, items: &[Value]) {
    encode_header(buf, shape, items.len());
    for item in items {
        write_value(buf, item);
    }
}

fn write_set(buf: &mut BytesMut, items: &ValueSet) {
    encode_header(buf, Shape::Set, items.len());
    for item in items {
        write_value(buf, item);
    }
}

fn write_slice(buf: &mut BytesMut, slice: &Slice) {
    buf.put_u8(tag::SLICE);
    write_value(buf, &slice.start);
    write_value(buf, &slice.stop);
    write_value(buf, &slice.step);
}
