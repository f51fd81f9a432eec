//! Value types the codec can carry.

mod value;

pub use value::{Complex, Slice, Value, ValueSet};
