//! Boxed values, for code that cannot use the typed accessors.

use std::fmt;

/// A type-erased element, or its absence.
///
/// Reads produce `Null` or the variant of the vector's storage kind. Writes accept `Null`
/// and the numeric variants; the remaining variants exist so that generic table code can
/// hand over whatever it holds and have the vector reject it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Char(char),
    Str(String),
}

impl Value {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// A short name for the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Byte(_) => "byte",
            Value::Short(_) => "short",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Byte(x) => write!(f, "{}", x),
            Value::Short(x) => write!(f, "{}", x),
            Value::Int(x) => write!(f, "{}", x),
            Value::Long(x) => write!(f, "{}", x),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Double(x) => write!(f, "{:?}", x),
            Value::Bool(x) => write!(f, "{}", x),
            Value::Char(x) => write!(f, "{}", x),
            Value::Str(x) => f.write_str(x),
        }
    }
}

macro_rules! implement_from {
    ($($ty:ty => $variant:ident),*) => { $(
        impl From<$ty> for Value {
            #[inline(always)] fn from(x: $ty) -> Self { Value::$variant(x) }
        }
    )* }
}

implement_from!(i8 => Byte, i16 => Short, i32 => Int, i64 => Long, f32 => Float, f64 => Double);
implement_from!(bool => Bool, char => Char, String => Str);

impl From<&str> for Value {
    fn from(x: &str) -> Self { Value::Str(x.to_string()) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(x: Option<T>) -> Self { x.map_or(Value::Null, Into::into) }
}

#[cfg(test)]
mod test {
    use super::Value;

    #[test]
    fn conversions() {
        assert_eq!(Value::from(3i16), Value::Short(3));
        assert_eq!(Value::from(None::<f64>), Value::Null);
        assert_eq!(Value::from(Some(2.5f64)), Value::Double(2.5));
        assert_eq!(Value::from("a"), Value::Str("a".to_string()));
        assert!(Value::default().is_null());
    }

    #[test]
    fn display() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Double(1.0).to_string(), "1.0");
        assert_eq!(Value::Long(-3).to_string(), "-3");
        assert_eq!(Value::Str("x".into()).type_name(), "string");
    }
}
