//! Decoding: bytes → `Value`.

use bytes::Buf;
use num_bigint::BigInt;

use super::tag::{self, Prefix, Shape, TagKind};
use crate::config::DecodeLimits;
use crate::error::CodecError;
use crate::types::{Complex, Slice, Value, ValueSet};

/// Decodes a single value starting at `offset`.
///
/// Returns the value and the number of bytes it occupied. Bytes after the
/// value are left alone.
pub fn decode_value(
    input: &[u8],
    offset: usize,
    limits: &DecodeLimits,
) -> Result<(Value, usize), CodecError> {
    let Some(rest) = input.get(offset..) else {
        return Err(CodecError::Truncated {
            tag: None,
            offset,
            needed: 1,
            remaining: 0,
        });
    };
    let mut reader = Reader {
        rest,
        total: input.len(),
        limits,
    };
    let value = reader.read_value(0)?;
    Ok((value, reader.offset() - offset))
}

/// Tag byte and offset of the value being decoded, for error reports.
#[derive(Clone, Copy)]
struct Site {
    tag: u8,
    offset: usize,
}

impl Site {
    fn malformed(self, reason: impl Into<String>) -> CodecError {
        CodecError::Malformed {
            tag: self.tag,
            offset: self.offset,
            reason: reason.into(),
        }
    }

    fn limit(self, reason: String) -> CodecError {
        CodecError::LimitExceeded {
            tag: self.tag,
            offset: self.offset,
            reason,
        }
    }
}

/// A cursor over the input shared by all recursive reads.
struct Reader<'a, 'l> {
    rest: &'a [u8],
    total: usize,
    limits: &'l DecodeLimits,
}

impl<'a> Reader<'a, '_> {
    fn offset(&self) -> usize {
        self.total - self.rest.len()
    }

    fn read_value(&mut self, depth: usize) -> Result<Value, CodecError> {
        let offset = self.offset();
        if !self.rest.has_remaining() {
            return Err(CodecError::Truncated {
                tag: None,
                offset,
                needed: 1,
                remaining: 0,
            });
        }

        let tag_byte = self.rest.get_u8();
        let (shape, prefix) = match tag::shape_for_tag(tag_byte) {
            Some(TagKind::Immediate(v)) => return Ok(Value::Integer(BigInt::from(v))),
            Some(TagKind::Shape(shape, prefix)) => (shape, prefix),
            None => {
                return Err(CodecError::UnknownTag {
                    tag: tag_byte,
                    offset,
                });
            }
        };
        let site = Site {
            tag: tag_byte,
            offset,
        };
        let len = self.read_len(site, prefix)?;

        match shape {
            Shape::None => Ok(Value::None),
            Shape::True => Ok(Value::Boolean(true)),
            Shape::False => Ok(Value::Boolean(false)),
            Shape::NotApplicable => Ok(Value::NotApplicable),
            Shape::OpenEnded => Ok(Value::OpenEnded),
            Shape::EmptyText => Ok(Value::Text(String::new())),
            Shape::EmptyTuple => Ok(Value::Tuple(Vec::new())),
            Shape::EmptyBytes => Ok(Value::Bytes(Vec::new())),
            Shape::Immediate(v) => Ok(Value::Integer(BigInt::from(v))),
            Shape::ExtendedInt => {
                if len == 0 {
                    return Err(site.malformed("zero-width integer"));
                }
                let data = self.take(site, len)?;
                Ok(Value::Integer(BigInt::from_signed_bytes_be(data)))
            }
            Shape::Float => {
                self.ensure(site, tag::FLOAT_WIDTH)?;
                Ok(Value::Float(self.rest.get_f64()))
            }
            Shape::Complex => {
                self.ensure(site, tag::COMPLEX_WIDTH)?;
                let re = self.rest.get_f64();
                let im = self.rest.get_f64();
                Ok(Value::Complex(Complex { re, im }))
            }
            Shape::Text => {
                let data = self.take(site, len)?;
                let s = std::str::from_utf8(data)
                    .map_err(|e| site.malformed(format!("invalid UTF-8 text: {e}")))?;
                Ok(Value::Text(s.to_owned()))
            }
            Shape::Bytes => Ok(Value::Bytes(self.take(site, len)?.to_vec())),
            Shape::Tuple => {
                let depth = self.enter(site, depth)?;
                self.read_tuple(len, depth)
            }
            Shape::Set => {
                let depth = self.enter(site, depth)?;
                self.read_set(site, len, depth)
            }
            Shape::Slice => {
                let depth = self.enter(site, depth)?;
                self.read_slice(site, depth)
            }
        }
    }

    fn read_len(&mut self, site: Site, prefix: Prefix) -> Result<usize, CodecError> {
        let len = match prefix {
            Prefix::None => return Ok(0),
            Prefix::Fixed(n) => n,
            Prefix::U8 => {
                self.ensure(site, 1)?;
                usize::from(self.rest.get_u8())
            }
            Prefix::U32 => {
                self.ensure(site, 4)?;
                self.rest.get_u32() as usize
            }
        };
        if len > self.limits.max_length {
            return Err(site.limit(format!(
                "declared length {len} exceeds {}",
                self.limits.max_length
            )));
        }
        Ok(len)
    }

    fn enter(&self, site: Site, depth: usize) -> Result<usize, CodecError> {
        let depth = depth + 1;
        if depth > self.limits.max_depth {
            return Err(site.limit(format!(
                "nesting depth exceeds {}",
                self.limits.max_depth
            )));
        }
        Ok(depth)
    }

    fn ensure(&self, site: Site, needed: usize) -> Result<(), CodecError> {
        if self.rest.remaining() < needed {
            Err(CodecError::Truncated {
                tag: Some(site.tag),
                offset: site.offset,
                needed,
                remaining: self.rest.remaining(),
            })
        } else {
            Ok(())
        }
    }

    fn take(&mut self, site: Site, len: usize) -> Result<&'a [u8], CodecError> {
        self.ensure(site, len)?;
        let (data, rest) = self.rest.split_at(len);
        self.rest = rest;
        Ok(data)
    }

    fn read_tuple(&mut self, len: usize, depth: usize) -> Result<Value, CodecError> {
        // Every element takes at least one byte, so a forged count cannot
        // reserve more than the input could hold.
        let mut items = Vec::with_capacity(len.min(self.rest.len()));
        for _ in 0..len {
            items.push(self.read_value(depth)?);
        }
        Ok(Value::Tuple(items))
    }

    fn read_set(&mut self, site: Site, len: usize, depth: usize) -> Result<Value, CodecError> {
        let mut items = ValueSet::new();
        for _ in 0..len {
            let at = self.offset();
            let item = self.read_value(depth)?;
            if !item.is_hashable() {
                return Err(site.malformed(format!("unhashable set element at offset {at}")));
            }
            if let Some(dup) = items.replace(item) {
                return Err(site.malformed(format!("duplicate set element {dup} at offset {at}")));
            }
        }
        Ok(Value::Set(items))
    }

    fn read_slice(&mut self, site: Site, depth: usize) -> Result<Value, CodecError> {
        let start = self.read_bound(site, depth)?;
        let stop = self.read_bound(site, depth)?;
        let step = self.read_bound(site, depth)?;
        Ok(Value::Slice(Box::new(Slice { start, stop, step })))
    }

    fn read_bound(&mut self, site: Site, depth: usize) -> Result<Value, CodecError> {
        let at = self.offset();
        match self.read_value(depth)? {
            bound @ (Value::None | Value::Integer(_)) => Ok(bound),
            other => Err(site.malformed(format!(
                "slice bound at offset {at} must be None or an integer, got: {other}"
            ))),
        }
    }
}
