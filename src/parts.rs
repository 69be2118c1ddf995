//! The logical contents of a vector, for persistence and interchange.
//!
//! A vector round-trips through its declared type, its values in logical order, and the
//! positions of its nulls. Views and shared storage do not survive the trip.

use crate::bitmap::NullBitmap;
use crate::common::Len;
use crate::datatype::StructField;
use crate::error::{Error, Result};
use crate::primitive::Primitive;
use crate::vector::{Nullability, Vector};

/// A field, its values in logical order, and the positions of its nulls.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Parts<T> {
    pub field: StructField,
    pub values: Vec<T>,
    pub nulls: NullBitmap,
}

impl<T: Primitive> Parts<T> {
    /// The values as native-endian bytes.
    pub fn values_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.values[..])
    }

    /// Rebuilds parts from bytes produced by [`Parts::values_bytes`].
    ///
    /// The buffer need not be aligned, but must hold a whole number of elements.
    pub fn from_bytes(field: StructField, bytes: &[u8], nulls: NullBitmap) -> Result<Self> {
        let width = T::KIND.width();
        if bytes.len() % width != 0 {
            return Err(Error::ByteLength { len: bytes.len(), width });
        }
        let values = bytes.chunks_exact(width).map(bytemuck::pod_read_unaligned).collect();
        Ok(Parts { field, values, nulls })
    }
}

impl<T: Primitive, N: Nullability> Vector<T, N> {
    /// Copies out the field, the logical values, and the logical null positions.
    pub fn to_parts(&self) -> Parts<T> {
        Parts {
            field: self.field().clone(),
            values: (0 .. self.len()).map(|index| self.raw(index)).collect(),
            nulls: (0 .. self.len()).map(|index| self.is_null(index)).collect(),
        }
    }

    /// Rebuilds a vector from its parts, checking the declared type.
    ///
    /// A dense vector only allocates a bitmap if `parts` has nulls.
    pub fn from_parts(parts: Parts<T>) -> Result<Self> {
        Self::check_field(&parts.field)?;
        let nulls = if N::NULLABLE || parts.nulls.null_count() > 0 { Some(parts.nulls) } else { None };
        Ok(Self::build(parts.field, parts.values, nulls))
    }
}

#[cfg(test)]
mod test {
    use super::Parts;
    use crate::bitmap::NullBitmap;
    use crate::datatype::{DataType, PrimitiveKind, StructField};
    use crate::error::Error;
    use crate::index::IndexMapping;
    use crate::value::Value;
    use crate::{DoubleVector, NullableIntVector, NullableLongVector};

    #[test]
    fn round_trip_through_view() {
        let vector = NullableLongVector::new("l", vec![5, -3, 7, 11], NullBitmap::from_positions([1]));
        let view = vector.with_view(&IndexMapping::explicit(vec![3, 1, 1])).unwrap();
        let parts = view.to_parts();
        assert_eq!(parts.values, vec![11, -3, -3]);
        assert_eq!(parts.nulls.iter().collect::<Vec<_>>(), vec![1, 2]);
        let rebuilt = NullableLongVector::from_parts(parts).unwrap();
        assert_eq!(rebuilt.to_vec(), view.to_vec());
        assert!(rebuilt.mapping().is_none());
    }

    #[test]
    fn dense_without_nulls_has_no_bitmap() {
        let vector = DoubleVector::new("d", vec![1.0, 2.0]);
        let parts = vector.to_parts();
        assert_eq!(parts.nulls.null_count(), 0);
        let mut rebuilt = DoubleVector::from_parts(parts).unwrap();
        assert!(!rebuilt.any_null());
        rebuilt.set(0, Value::Null).unwrap();
        assert_eq!(rebuilt.to_parts().nulls, NullBitmap::from_positions([0]));
    }

    #[test]
    fn checks_declared_type() {
        let parts = Parts { field: StructField::new("i", DataType::of(PrimitiveKind::Int)), values: vec![1i32], nulls: NullBitmap::new() };
        assert!(NullableIntVector::from_parts(parts).is_err());
    }

    #[test]
    fn bytes() {
        let vector = NullableIntVector::from_options("i", [Some(-1), None, Some(258)]);
        let parts = vector.to_parts();
        let bytes = parts.values_bytes().to_vec();
        assert_eq!(bytes.len(), 12);
        // Deliberately misaligned.
        let mut shifted = vec![0u8];
        shifted.extend_from_slice(&bytes);
        let rebuilt = Parts::<i32>::from_bytes(parts.field.clone(), &shifted[1..], parts.nulls.clone()).unwrap();
        assert_eq!(rebuilt, parts);
        assert_eq!(
            Parts::<i32>::from_bytes(parts.field.clone(), &bytes[..7], NullBitmap::new()),
            Err(Error::ByteLength { len: 7, width: 4 }),
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let vector = NullableLongVector::from_options("l", [Some(1), None, Some(3)]);
        let parts = vector.to_parts();
        let json = serde_json::to_string(&parts).unwrap();
        let decoded: Parts<i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(NullableLongVector::from_parts(decoded).unwrap().to_vec(), vector.to_vec());
        let encoded = bincode::serialize(&parts).unwrap();
        assert_eq!(bincode::deserialize::<Parts<i64>>(&encoded).unwrap(), parts);
    }
}
