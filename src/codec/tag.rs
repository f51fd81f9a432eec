//! Tag byte registry.
//!
//! Every encoded value starts with one tag byte. Bytes `0x20..=0xEF` are
//! immediate integers (`value = tag - IMMEDIATE_BIAS`); the bytes below that
//! name a shape, and `0xF0..=0xFF` are unassigned.

// Singletons
pub const NONE: u8 = 0x00;
pub const EMPTY_TEXT: u8 = 0x01;
pub const EMPTY_TUPLE: u8 = 0x02;
pub const TRUE: u8 = 0x03;
pub const FALSE: u8 = 0x04;
pub const NOT_APPLICABLE: u8 = 0x05;
pub const OPEN_ENDED: u8 = 0x06;
pub const EMPTY_BYTES: u8 = 0x07;

// Text (UTF-8, length in bytes)
pub const TEXT_L1: u8 = 0x08;
pub const TEXT_L4: u8 = 0x09;
// TEXT_1..TEXT_4: 0x0A..=0x0D, exactly 1..4 bytes, no prefix
pub const TEXT_1: u8 = 0x0A;

// Tuple
// TUPLE_1..TUPLE_4: 0x0E..=0x11, exactly 1..4 elements, no prefix
pub const TUPLE_1: u8 = 0x0E;

// Integer (outside the immediate range), big-endian two's complement
pub const INT_L1: u8 = 0x12;
pub const INT_L4: u8 = 0x13;

// Float (IEEE 754 double-precision)
pub const FLOAT: u8 = 0x14;
pub const SLICE: u8 = 0x15;
pub const SET: u8 = 0x16;
pub const COMPLEX: u8 = 0x17;

pub const TUPLE_L1: u8 = 0x18;
pub const TUPLE_L4: u8 = 0x19;

// Bytes
pub const BYTES_L1: u8 = 0x1A;
pub const BYTES_L4: u8 = 0x1B;
// BYTES_1..BYTES_4: 0x1C..=0x1F, exactly 1..4 bytes, no prefix
pub const BYTES_1: u8 = 0x1C;

// Immediate integers: -48..=159 in 0x20..=0xEF
pub const IMMEDIATE_MIN: i64 = -0x30;
pub const IMMEDIATE_MAX: i64 = 0x9F;
pub const IMMEDIATE_BIAS: i64 = 0x50;
pub const IMMEDIATE_FIRST: u8 = 0x20;
pub const IMMEDIATE_LAST: u8 = 0xEF;

/// Longest length carried by a dedicated short-form tag.
pub const SHORT_MAX: usize = 4;

/// Payload widths of the fixed-size numeric shapes.
pub const FLOAT_WIDTH: usize = 8;
pub const COMPLEX_WIDTH: usize = 16;

/// The closed set of value shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    None,
    True,
    False,
    NotApplicable,
    OpenEnded,
    EmptyText,
    EmptyTuple,
    EmptyBytes,
    /// Small integer carried inside the tag byte.
    Immediate(i16),
    ExtendedInt,
    Float,
    Complex,
    Text,
    Bytes,
    Tuple,
    Set,
    Slice,
}

/// How the length of a tag's payload is determined.
///
/// The unit is bytes for text, bytes and integers, and elements for tuples
/// and sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// No length: the shape has no payload or a fixed-size one.
    None,
    /// Length implied by the tag itself.
    Fixed(usize),
    /// One-byte unsigned length follows the tag.
    U8,
    /// Four-byte big-endian unsigned length follows the tag.
    U32,
}

impl Prefix {
    /// Number of prefix bytes following the tag.
    pub fn width(self) -> usize {
        match self {
            Self::None | Self::Fixed(_) => 0,
            Self::U8 => 1,
            Self::U32 => 4,
        }
    }

    /// The general (non-short) prefix needed to carry `len`.
    pub fn for_len(len: usize) -> Self {
        if len <= u8::MAX as usize {
            Self::U8
        } else {
            Self::U32
        }
    }
}

/// Result of looking up a tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Immediate(i16),
    Shape(Shape, Prefix),
}

/// Returns the immediate tag for `value`, if it falls in the immediate range.
pub fn immediate_tag(value: i64) -> Option<u8> {
    if (IMMEDIATE_MIN..=IMMEDIATE_MAX).contains(&value) {
        Some((value + IMMEDIATE_BIAS) as u8)
    } else {
        None
    }
}

/// Returns the tag for a shape.
///
/// `len` is the byte length (text, bytes, extended integers) or element count
/// (tuples) and is ignored for every other shape.
pub fn tag_for_shape(shape: Shape, len: usize) -> u8 {
    match shape {
        Shape::None => NONE,
        Shape::True => TRUE,
        Shape::False => FALSE,
        Shape::NotApplicable => NOT_APPLICABLE,
        Shape::OpenEnded => OPEN_ENDED,
        Shape::EmptyText => EMPTY_TEXT,
        Shape::EmptyTuple => EMPTY_TUPLE,
        Shape::EmptyBytes => EMPTY_BYTES,
        Shape::Immediate(v) => (i64::from(v) + IMMEDIATE_BIAS) as u8,
        Shape::ExtendedInt => length_classed(len, None, INT_L1, INT_L4),
        Shape::Float => FLOAT,
        Shape::Complex => COMPLEX,
        Shape::Text => length_classed(len, Some(TEXT_1), TEXT_L1, TEXT_L4),
        Shape::Bytes => length_classed(len, Some(BYTES_1), BYTES_L1, BYTES_L4),
        Shape::Tuple => length_classed(len, Some(TUPLE_1), TUPLE_L1, TUPLE_L4),
        Shape::Set => SET,
        Shape::Slice => SLICE,
    }
}

fn length_classed(len: usize, short: Option<u8>, l1: u8, l4: u8) -> u8 {
    match short {
        Some(first) if (1..=SHORT_MAX).contains(&len) => first + (len - 1) as u8,
        _ => match Prefix::for_len(len) {
            Prefix::U8 => l1,
            _ => l4,
        },
    }
}

/// Looks up the decode rule for a tag byte. Returns `None` for unassigned tags.
pub fn shape_for_tag(tag: u8) -> Option<TagKind> {
    use Prefix::{Fixed, U8, U32};

    let kind = match tag {
        IMMEDIATE_FIRST..=IMMEDIATE_LAST => {
            return Some(TagKind::Immediate((i64::from(tag) - IMMEDIATE_BIAS) as i16));
        }
        NONE => (Shape::None, Prefix::None),
        EMPTY_TEXT => (Shape::EmptyText, Prefix::None),
        EMPTY_TUPLE => (Shape::EmptyTuple, Prefix::None),
        TRUE => (Shape::True, Prefix::None),
        FALSE => (Shape::False, Prefix::None),
        NOT_APPLICABLE => (Shape::NotApplicable, Prefix::None),
        OPEN_ENDED => (Shape::OpenEnded, Prefix::None),
        EMPTY_BYTES => (Shape::EmptyBytes, Prefix::None),
        TEXT_L1 => (Shape::Text, U8),
        TEXT_L4 => (Shape::Text, U32),
        0x0A..=0x0D => (Shape::Text, Fixed(usize::from(tag - TEXT_1) + 1)),
        0x0E..=0x11 => (Shape::Tuple, Fixed(usize::from(tag - TUPLE_1) + 1)),
        INT_L1 => (Shape::ExtendedInt, U8),
        INT_L4 => (Shape::ExtendedInt, U32),
        FLOAT => (Shape::Float, Prefix::None),
        SLICE => (Shape::Slice, Prefix::None),
        SET => (Shape::Set, U32),
        COMPLEX => (Shape::Complex, Prefix::None),
        TUPLE_L1 => (Shape::Tuple, U8),
        TUPLE_L4 => (Shape::Tuple, U32),
        BYTES_L1 => (Shape::Bytes, U8),
        BYTES_L4 => (Shape::Bytes, U32),
        0x1C..=0x1F => (Shape::Bytes, Fixed(usize::from(tag - BYTES_1) + 1)),
        _ => return None,
    };
    Some(TagKind::Shape(kind.0, kind.1))
}
