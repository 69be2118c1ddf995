//! Primitive storage kinds and the total coercions between them.
//!
//! Every stored kind can be read as every other kind. Conversions follow the usual
//! machine semantics: integers truncate or sign-extend, floats round toward zero and
//! saturate into `i32`/`i64` (NaN becomes zero), and narrower integer targets of a float
//! go through `i32` first. A value reads as `true` exactly when it is nonzero.

use crate::datatype::PrimitiveKind;
use crate::value::Value;

mod sealed {
    pub trait Sealed {}
}

/// A primitive type that can back a vector.
pub trait Primitive:
    Copy + Default + PartialEq + PartialOrd + std::fmt::Debug + bytemuck::Pod + sealed::Sealed + 'static
{
    /// The kind this type stores.
    const KIND: PrimitiveKind;

    fn as_bool(self) -> bool;
    /// As a 16-bit code unit.
    fn as_char(self) -> u16;
    fn as_byte(self) -> i8;
    fn as_short(self) -> i16;
    fn as_int(self) -> i32;
    fn as_long(self) -> i64;
    fn as_float(self) -> f32;
    fn as_double(self) -> f64;

    /// Coerces any other primitive into this kind.
    fn from_primitive<P: Primitive>(other: P) -> Self;

    /// Boxes the value as the variant of its own kind.
    fn into_value(self) -> Value;

    /// Unboxes and coerces a numeric value, or returns `None` for every other variant.
    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Byte(x) => Some(Self::from_primitive(x)),
            Value::Short(x) => Some(Self::from_primitive(x)),
            Value::Int(x) => Some(Self::from_primitive(x)),
            Value::Long(x) => Some(Self::from_primitive(x)),
            Value::Float(x) => Some(Self::from_primitive(x)),
            Value::Double(x) => Some(Self::from_primitive(x)),
            _ => None,
        }
    }
}

/// Floating point kinds, which may hold values that are not numbers.
pub trait Float: Primitive {
    /// True for NaN and for either infinity.
    fn is_invalid(self) -> bool;
}

macro_rules! implement_integer {
    ($($index_type:ty => $kind:ident, $variant:ident, $from:ident);*) => { $(
        impl sealed::Sealed for $index_type { }
        impl Primitive for $index_type {
            const KIND: PrimitiveKind = PrimitiveKind::$kind;
            #[inline(always)] fn as_bool(self) -> bool { self != 0 }
            #[inline(always)] fn as_char(self) -> u16 { self as u16 }
            #[inline(always)] fn as_byte(self) -> i8 { self as i8 }
            #[inline(always)] fn as_short(self) -> i16 { self as i16 }
            #[inline(always)] fn as_int(self) -> i32 { self as i32 }
            #[inline(always)] fn as_long(self) -> i64 { self as i64 }
            #[inline(always)] fn as_float(self) -> f32 { self as f32 }
            #[inline(always)] fn as_double(self) -> f64 { self as f64 }
            #[inline(always)] fn from_primitive<P: Primitive>(other: P) -> Self { other.$from() }
            #[inline(always)] fn into_value(self) -> Value { Value::$variant(self) }
        }
    )* }
}

macro_rules! implement_float {
    ($($index_type:ty => $kind:ident, $variant:ident, $from:ident);*) => { $(
        impl sealed::Sealed for $index_type { }
        impl Primitive for $index_type {
            const KIND: PrimitiveKind = PrimitiveKind::$kind;
            #[inline(always)] fn as_bool(self) -> bool { self != 0.0 }
            #[inline(always)] fn as_char(self) -> u16 { self.as_int() as u16 }
            #[inline(always)] fn as_byte(self) -> i8 { self.as_int() as i8 }
            #[inline(always)] fn as_short(self) -> i16 { self.as_int() as i16 }
            // `as` from a float rounds toward zero, saturates, and sends NaN to zero.
            #[inline(always)] fn as_int(self) -> i32 { self as i32 }
            #[inline(always)] fn as_long(self) -> i64 { self as i64 }
            #[inline(always)] fn as_float(self) -> f32 { self as f32 }
            #[inline(always)] fn as_double(self) -> f64 { self as f64 }
            #[inline(always)] fn from_primitive<P: Primitive>(other: P) -> Self { other.$from() }
            #[inline(always)] fn into_value(self) -> Value { Value::$variant(self) }
        }
        impl Float for $index_type {
            #[inline(always)] fn is_invalid(self) -> bool { !self.is_finite() }
        }
    )* }
}

implement_integer!(i8 => Byte, Byte, as_byte; i16 => Short, Short, as_short; i32 => Int, Int, as_int; i64 => Long, Long, as_long);
implement_float!(f32 => Float, Float, as_float; f64 => Double, Double, as_double);
