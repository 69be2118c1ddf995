//! Declared types and the fields that carry them.
//!
//! These describe a vector from the outside; the vector checks its field
//! against its own storage kind when it is constructed.

use std::fmt;

/// The primitive kinds a vector may store.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    /// The width of one stored element, in bytes.
    pub fn width(self) -> usize {
        match self {
            PrimitiveKind::Byte => 1,
            PrimitiveKind::Short => 2,
            PrimitiveKind::Int | PrimitiveKind::Float => 4,
            PrimitiveKind::Long | PrimitiveKind::Double => 8,
        }
    }

    /// Whether the kind is a floating point kind.
    pub fn is_floating(self) -> bool {
        matches!(self, PrimitiveKind::Float | PrimitiveKind::Double)
    }

    fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The declared type of a vector: a primitive kind, and whether nulls are built in.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DataType {
    pub kind: PrimitiveKind,
    pub nullable: bool,
}

impl DataType {
    /// The non-nullable type of `kind`.
    pub const fn of(kind: PrimitiveKind) -> Self {
        DataType { kind, nullable: false }
    }
    /// The nullable variant of `kind`.
    pub const fn nullable(kind: PrimitiveKind) -> Self {
        DataType { kind, nullable: true }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "nullable {}", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

/// A named, typed column descriptor.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StructField {
    pub name: String,
    pub dtype: DataType,
}

impl StructField {
    pub fn new(name: impl Into<String>, dtype: DataType) -> Self {
        StructField { name: name.into(), dtype }
    }
}

impl fmt::Display for StructField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.dtype)
    }
}
