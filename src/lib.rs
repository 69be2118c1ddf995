//! Typed, nullable, columnar vectors.
//!
//! Each vector holds a single primitive kind in dense storage. Absent elements are
//! marked in a null bitmap that sits beside the storage, rather than in the values
//! themselves. A vector can be viewed through an [`IndexMapping`] to reorder, filter or
//! repeat its elements without copying them, and every vector can be read as any
//! primitive kind through the total coercions of [`Primitive`].
//!
//! The [`ValueVector`] trait exposes all of this without naming the storage type, for
//! table code that holds columns of many kinds side by side.

pub mod bitmap;
pub mod common;
pub mod datatype;
pub mod error;
pub mod index;
pub mod parts;
pub mod primitive;
pub mod stream;
pub mod value;
pub mod vector;

pub use bitmap::NullBitmap;
pub use common::Len;
pub use datatype::{DataType, PrimitiveKind, StructField};
pub use error::{Error, Result};
pub use index::IndexMapping;
pub use parts::Parts;
pub use primitive::{Float, Primitive};
pub use stream::{Doubles, Ints, Longs, Present};
pub use value::Value;
pub use vector::{Dense, Nullability, Nullable, Vector};

pub type ByteVector = Vector<i8, Dense>;
pub type ShortVector = Vector<i16, Dense>;
pub type IntVector = Vector<i32, Dense>;
pub type LongVector = Vector<i64, Dense>;
pub type FloatVector = Vector<f32, Dense>;
pub type DoubleVector = Vector<f64, Dense>;

pub type NullableByteVector = Vector<i8, Nullable>;
pub type NullableShortVector = Vector<i16, Nullable>;
pub type NullableIntVector = Vector<i32, Nullable>;
pub type NullableLongVector = Vector<i64, Nullable>;
pub type NullableFloatVector = Vector<f32, Nullable>;
pub type NullableDoubleVector = Vector<f64, Nullable>;

/// Type-erased access to a vector of any primitive kind.
///
/// The `get_*` readers coerce the stored value and do not consult the null bitmap: an
/// absent position reads as whatever its slot holds. Use [`ValueVector::get`] or
/// [`ValueVector::is_null`] to observe absence. The streams skip absent positions.
///
/// All positions are logical positions. Readers panic on positions at or past `len()`.
pub trait ValueVector: Len + std::fmt::Display {
    fn field(&self) -> &StructField;
    fn name(&self) -> &str { &self.field().name }
    fn data_type(&self) -> DataType { self.field().dtype }

    fn is_null(&self, index: usize) -> bool;
    fn null_count(&self) -> usize;
    fn any_null(&self) -> bool { self.null_count() > 0 }

    /// The boxed value at `index`, or `Value::Null` if it is absent.
    fn get(&self, index: usize) -> Value;
    /// Writes a boxed value; see [`Vector::set`].
    fn set(&mut self, index: usize, value: Value) -> Result<()>;

    fn get_bool(&self, index: usize) -> bool;
    fn get_char(&self, index: usize) -> u16;
    fn get_byte(&self, index: usize) -> i8;
    fn get_short(&self, index: usize) -> i16;
    fn get_int(&self, index: usize) -> i32;
    fn get_long(&self, index: usize) -> i64;
    fn get_float(&self, index: usize) -> f32;
    fn get_double(&self, index: usize) -> f64;

    fn double_stream(&self) -> Box<dyn Iterator<Item = f64>>;
    fn long_stream(&self) -> Box<dyn Iterator<Item = i64>>;
    fn int_stream(&self) -> Box<dyn Iterator<Item = i32>>;
}

impl<T: Primitive, N: Nullability> ValueVector for Vector<T, N> {
    #[inline(always)] fn field(&self) -> &StructField { Vector::field(self) }
    #[inline(always)] fn is_null(&self, index: usize) -> bool { Vector::is_null(self, index) }
    #[inline(always)] fn null_count(&self) -> usize { Vector::null_count(self) }
    #[inline(always)] fn any_null(&self) -> bool { Vector::any_null(self) }

    #[inline]
    fn get(&self, index: usize) -> Value {
        self.value(index).map_or(Value::Null, Primitive::into_value)
    }
    #[inline]
    fn set(&mut self, index: usize, value: Value) -> Result<()> {
        Vector::set(self, index, value)
    }

    #[inline(always)] fn get_bool(&self, index: usize) -> bool { self.raw(index).as_bool() }
    #[inline(always)] fn get_char(&self, index: usize) -> u16 { self.raw(index).as_char() }
    #[inline(always)] fn get_byte(&self, index: usize) -> i8 { self.raw(index).as_byte() }
    #[inline(always)] fn get_short(&self, index: usize) -> i16 { self.raw(index).as_short() }
    #[inline(always)] fn get_int(&self, index: usize) -> i32 { self.raw(index).as_int() }
    #[inline(always)] fn get_long(&self, index: usize) -> i64 { self.raw(index).as_long() }
    #[inline(always)] fn get_float(&self, index: usize) -> f32 { self.raw(index).as_float() }
    #[inline(always)] fn get_double(&self, index: usize) -> f64 { self.raw(index).as_double() }

    fn double_stream(&self) -> Box<dyn Iterator<Item = f64>> { Box::new(self.doubles()) }
    fn long_stream(&self) -> Box<dyn Iterator<Item = i64>> { Box::new(self.longs()) }
    fn int_stream(&self) -> Box<dyn Iterator<Item = i32>> { Box::new(self.ints()) }
}
