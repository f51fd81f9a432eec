//! Immutable value types.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use num_bigint::BigInt;

/// Type alias for unordered simple sets. Iteration is sorted, so encoding is stable.
pub type ValueSet = BTreeSet<Value>;

/// A value in the closed, acyclic family the codec understands.
///
/// Floating payloads compare by IEEE total order, which makes `Value` usable
/// as a set element: bit-identical NaNs are equal and `0.0 != -0.0`.
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Boolean(bool),
    /// Singleton sentinel meaning "this operation does not apply".
    NotApplicable,
    /// Singleton sentinel meaning "and so on" (an open-ended range).
    OpenEnded,
    Integer(BigInt),
    Float(f64),
    Complex(Complex),
    Text(String),
    Bytes(Vec<u8>),
    Tuple(Vec<Value>),
    Set(ValueSet),
    Slice(Box<Slice>),
}

/// A complex number, real part first.
#[derive(Debug, Clone, Copy)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

/// A `(start, stop, step)` triple. Each bound must be `None` or an integer to
/// be encodable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slice {
    pub start: Value,
    pub stop: Value,
    pub step: Value,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

impl Slice {
    pub fn new(start: impl Into<Value>, stop: impl Into<Value>, step: impl Into<Value>) -> Self {
        Self {
            start: start.into(),
            stop: stop.into(),
            step: step.into(),
        }
    }
}

impl Value {
    /// Builds a set value from any collection of values; duplicates collapse.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Set(items.into_iter().collect())
    }

    /// Builds a tuple value.
    pub fn tuple(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Tuple(items.into_iter().collect())
    }

    /// Builds a slice value.
    pub fn slice(start: impl Into<Value>, stop: impl Into<Value>, step: impl Into<Value>) -> Self {
        Self::Slice(Box::new(Slice::new(start, stop, step)))
    }

    /// Returns the value as a string reference, if it is a `Text` variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a big integer, if it is an `Integer` variant.
    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Self::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&ValueSet> {
        match self {
            Self::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Whether the value may be a set element. Slices are unhashable, and so
    /// is any composite containing one.
    pub fn is_hashable(&self) -> bool {
        match self {
            Self::Slice(_) => false,
            Self::Tuple(items) => items.iter().all(Value::is_hashable),
            Self::Set(items) => items.iter().all(Value::is_hashable),
            _ => true,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Boolean(_) => 1,
            Self::NotApplicable => 2,
            Self::OpenEnded => 3,
            Self::Integer(_) => 4,
            Self::Float(_) => 5,
            Self::Complex(_) => 6,
            Self::Text(_) => 7,
            Self::Bytes(_) => 8,
            Self::Tuple(_) => 9,
            Self::Set(_) => 10,
            Self::Slice(_) => 11,
        }
    }
}

// -- Equality and ordering --

impl PartialEq for Complex {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Complex {}

impl PartialOrd for Complex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Complex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.re
            .total_cmp(&other.re)
            .then_with(|| self.im.total_cmp(&other.im))
    }
}

impl Hash for Complex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.re.to_bits().hash(state);
        self.im.to_bits().hash(state);
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Boolean(a), Self::Boolean(b)) => a.cmp(b),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Complex(a), Self::Complex(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Bytes(a), Self::Bytes(b)) => a.cmp(b),
            (Self::Tuple(a), Self::Tuple(b)) => a.cmp(b),
            (Self::Set(a), Self::Set(b)) => a.cmp(b),
            (Self::Slice(a), Self::Slice(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Self::None | Self::NotApplicable | Self::OpenEnded => {}
            Self::Boolean(b) => b.hash(state),
            Self::Integer(i) => i.hash(state),
            Self::Float(f) => f.to_bits().hash(state),
            Self::Complex(c) => c.hash(state),
            Self::Text(s) => s.hash(state),
            Self::Bytes(b) => b.hash(state),
            Self::Tuple(items) => items.hash(state),
            Self::Set(items) => items.hash(state),
            Self::Slice(s) => s.hash(state),
        }
    }
}

// -- Convenience conversions --

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(BigInt::from(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(BigInt::from(i))
    }
}

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        Self::Integer(BigInt::from(i))
    }
}

impl From<i128> for Value {
    fn from(i: i128) -> Self {
        Self::Integer(BigInt::from(i))
    }
}

impl From<BigInt> for Value {
    fn from(i: BigInt) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Complex> for Value {
    fn from(c: Complex) -> Self {
        Self::Complex(c)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Tuple(v)
    }
}

impl From<ValueSet> for Value {
    fn from(s: ValueSet) -> Self {
        Self::Set(s)
    }
}

impl From<Slice> for Value {
    fn from(s: Slice) -> Self {
        Self::Slice(Box::new(s))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::None, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::NotApplicable => write!(f, "NotApplicable"),
            Self::OpenEnded => write!(f, "..."),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Complex(c) => write!(f, "({:?}{:+?}j)", c.re, c.im),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Self::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Self::Set(items) => {
                write!(f, "{{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "}}")
            }
            Self::Slice(s) => write!(f, "slice({}, {}, {})", s.start, s.stop, s.step),
        }
    }
}
