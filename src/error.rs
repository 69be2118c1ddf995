//! Errors reported by vector construction and mutation.

use thiserror::Error;

use crate::datatype::{DataType, StructField};

/// The failure modes of this crate.
///
/// Every variant is a violated caller contract; none is transient.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The field's declared type does not match the concrete vector.
    #[error("invalid data type for field `{field}`: expected {expected}")]
    DataTypeMismatch { field: StructField, expected: DataType },

    /// A boxed write carried something other than a number or `Null`.
    #[error("invalid value type: {0}")]
    InvalidValue(&'static str),

    /// A logical position, or a mapped raw position, fell outside its range.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A raw byte buffer did not hold a whole number of elements.
    #[error("buffer of {len} bytes is not a multiple of the element width {width}")]
    ByteLength { len: usize, width: usize },
}

/// A `Result` defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod test {
    use super::Error;
    use crate::datatype::{DataType, PrimitiveKind, StructField};

    #[test]
    fn messages() {
        let field = StructField::new("x", DataType::of(PrimitiveKind::Long));
        let error = Error::DataTypeMismatch { field, expected: DataType::nullable(PrimitiveKind::Long) };
        assert_eq!(error.to_string(), "invalid data type for field `x: long`: expected nullable long");
        let error = Error::IndexOutOfBounds { index: 7, len: 3 };
        assert_eq!(error.to_string(), "index 7 out of bounds for length 3");
        assert_eq!(Error::InvalidValue("string").to_string(), "invalid value type: string");
    }
}
