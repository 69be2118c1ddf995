//! Typed primitive vectors, with optional null markers and index-mapped views.
//!
//! One generic type covers both families of vector. A [`Dense`] vector starts without
//! a null bitmap and allocates one the first time a null is written; a [`Nullable`]
//! vector always carries one. Both can be viewed through an [`IndexMapping`] without
//! copying, and the two differ in what [`Vector::select`] does: a dense selection is a
//! view, while a nullable selection is an independent copy.
//!
//! Storage is shared between a vector and all views derived from it. Writes through
//! any of them are visible to all of them. Vectors are neither `Send` nor `Sync`, and
//! callers are responsible for keeping to one writer at a time.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::bitmap::NullBitmap;
use crate::common::{check_bounds, Len};
use crate::datatype::{DataType, StructField};
use crate::error::{Error, Result};
use crate::index::IndexMapping;
use crate::primitive::{Float, Primitive};
use crate::stream::{Doubles, Ints, Longs, Present};
use crate::value::Value;

mod sealed {
    pub trait Sealed {}
}

/// Whether a vector's nulls are built in or retrofitted.
pub trait Nullability: sealed::Sealed + Sized + 'static {
    /// Whether vectors of this policy always carry a bitmap.
    const NULLABLE: bool;
    #[doc(hidden)]
    fn select<T: Primitive>(vector: &Vector<T, Self>, mapping: &IndexMapping) -> Result<Vector<T, Self>>;
}

/// Dense storage that acquires a null bitmap lazily, on the first null write.
#[derive(Copy, Clone, Debug)]
pub enum Dense { }

/// Storage paired with a null bitmap from construction.
#[derive(Copy, Clone, Debug)]
pub enum Nullable { }

impl sealed::Sealed for Dense { }
impl sealed::Sealed for Nullable { }

impl Nullability for Dense {
    const NULLABLE: bool = false;
    #[inline]
    fn select<T: Primitive>(vector: &Vector<T, Self>, mapping: &IndexMapping) -> Result<Vector<T, Self>> {
        vector.with_view(mapping)
    }
}

impl Nullability for Nullable {
    const NULLABLE: bool = true;
    fn select<T: Primitive>(vector: &Vector<T, Self>, mapping: &IndexMapping) -> Result<Vector<T, Self>> {
        let selected = vector.with_view(mapping)?.materialize();
        #[cfg(feature = "logging")]
        log::debug!("materialized {} of {} rows from `{}`", selected.len(), vector.len(), vector.name());
        Ok(selected)
    }
}

/// A named sequence of `T`, possibly with absent elements.
pub struct Vector<T, N = Dense> {
    field: StructField,
    data: Rc<[Cell<T>]>,
    /// Indexed by raw position. `None` until the first null for dense vectors.
    nulls: Rc<RefCell<Option<NullBitmap>>>,
    /// `None` means the identity over all of `data`.
    mapping: Option<IndexMapping>,
    nullability: PhantomData<N>,
}

impl<T: Primitive> Vector<T, Dense> {
    /// A dense vector with no nulls.
    pub fn new(name: impl Into<String>, data: Vec<T>) -> Self {
        Self::build(StructField::new(name, Self::expected_type()), data, None)
    }

    /// A dense vector described by `field`, which must declare the non-nullable type of `T`.
    pub fn from_field(field: StructField, data: Vec<T>) -> Result<Self> {
        Self::check_field(&field)?;
        Ok(Self::build(field, data, None))
    }
}

impl<T: Primitive> Vector<T, Nullable> {
    /// A nullable vector; `nulls` marks the absent positions of `data`.
    pub fn new(name: impl Into<String>, data: Vec<T>, nulls: NullBitmap) -> Self {
        Self::build(StructField::new(name, Self::expected_type()), data, Some(nulls))
    }

    /// A nullable vector described by `field`, which must declare the nullable type of `T`.
    pub fn from_field(field: StructField, data: Vec<T>, nulls: NullBitmap) -> Result<Self> {
        Self::check_field(&field)?;
        Ok(Self::build(field, data, Some(nulls)))
    }

    /// A nullable vector from optional values; each `None` stores a default value.
    pub fn from_options(name: impl Into<String>, values: impl IntoIterator<Item = Option<T>>) -> Self {
        let mut nulls = NullBitmap::new();
        let data = values.into_iter().enumerate().map(|(index, value)| {
            value.unwrap_or_else(|| { nulls.set_null(index); T::default() })
        }).collect();
        Self::new(name, data, nulls)
    }
}

impl<T: Primitive, N: Nullability> Vector<T, N> {
    pub(crate) fn build(field: StructField, data: Vec<T>, nulls: Option<NullBitmap>) -> Self {
        Vector {
            field,
            data: data.into_iter().map(Cell::new).collect(),
            nulls: Rc::new(RefCell::new(nulls)),
            mapping: None,
            nullability: PhantomData,
        }
    }

    /// The data type a field must declare to describe this vector.
    pub fn expected_type() -> DataType {
        DataType { kind: T::KIND, nullable: N::NULLABLE }
    }

    pub(crate) fn check_field(field: &StructField) -> Result<()> {
        let expected = Self::expected_type();
        if field.dtype != expected {
            return Err(Error::DataTypeMismatch { field: field.clone(), expected });
        }
        Ok(())
    }

    #[inline(always)] pub fn field(&self) -> &StructField { &self.field }
    #[inline(always)] pub fn name(&self) -> &str { &self.field.name }
    #[inline(always)] pub fn data_type(&self) -> DataType { self.field.dtype }
    /// The active mapping, if this vector is a view.
    #[inline(always)] pub fn mapping(&self) -> Option<&IndexMapping> { self.mapping.as_ref() }

    #[inline(always)]
    #[track_caller]
    fn resolve(&self, index: usize) -> usize {
        match &self.mapping {
            Some(mapping) => mapping.resolve(index),
            None => { check_bounds(index, self.data.len()); index }
        }
    }

    #[inline]
    fn try_resolve(&self, index: usize) -> Result<usize> {
        let raw = match &self.mapping {
            Some(mapping) => mapping.get(index),
            None => (index < self.data.len()).then_some(index),
        };
        raw.ok_or(Error::IndexOutOfBounds { index, len: self.len() })
    }

    #[inline(always)]
    fn raw_is_null(&self, raw: usize) -> bool {
        self.nulls.borrow().as_ref().is_some_and(|bitmap| bitmap.is_null(raw))
    }

    /// The stored value at `index`, whether or not it is marked null.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline(always)]
    #[track_caller]
    pub fn raw(&self, index: usize) -> T {
        self.data[self.resolve(index)].get()
    }

    /// The value at `index`, or `None` if it is absent.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    #[track_caller]
    pub fn value(&self, index: usize) -> Option<T> {
        let raw = self.resolve(index);
        if self.raw_is_null(raw) { None } else { Some(self.data[raw].get()) }
    }

    /// Whether the value at `index` is absent.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    #[track_caller]
    pub fn is_null(&self, index: usize) -> bool {
        self.raw_is_null(self.resolve(index))
    }

    /// The number of absent logical positions.
    pub fn null_count(&self) -> usize {
        let nulls = self.nulls.borrow();
        match (nulls.as_ref(), &self.mapping) {
            (None, _) => 0,
            (Some(bitmap), None) => bitmap.iter().take_while(|&raw| raw < self.data.len()).count(),
            (Some(bitmap), Some(mapping)) => mapping.iter().filter(|&raw| bitmap.is_null(raw)).count(),
        }
    }

    /// Whether any logical position is absent.
    pub fn any_null(&self) -> bool {
        let nulls = self.nulls.borrow();
        match nulls.as_ref() {
            None => false,
            Some(bitmap) => (0 .. self.len()).any(|index| bitmap.is_null(self.resolve(index))),
        }
    }

    /// Iterates over every logical position, yielding `None` for absent values.
    pub fn iter(&self) -> impl Iterator<Item = Option<T>> + '_ {
        (0 .. self.len()).map(move |index| self.value(index))
    }

    /// Copies out the logical values.
    pub fn to_vec(&self) -> Vec<Option<T>> {
        self.iter().collect()
    }

    /// A lazy stream of the present values.
    pub fn present(&self) -> Present<T> {
        Present::new(Rc::clone(&self.data), Rc::clone(&self.nulls), self.mapping.clone(), self.len())
    }
    /// A lazy stream of the present values, as `f64`.
    pub fn doubles(&self) -> Doubles<T> {
        self.present().map(T::as_double as fn(T) -> f64)
    }
    /// A lazy stream of the present values, as `i64`.
    pub fn longs(&self) -> Longs<T> {
        self.present().map(T::as_long as fn(T) -> i64)
    }
    /// A lazy stream of the present values, as `i32`.
    pub fn ints(&self) -> Ints<T> {
        self.present().map(T::as_int as fn(T) -> i32)
    }

    /// Writes a boxed value at `index`.
    ///
    /// `Value::Null` marks the position absent. Numeric variants are coerced to `T`;
    /// any other variant is rejected and nothing is written.
    pub fn set(&mut self, index: usize, value: Value) -> Result<()> {
        match value {
            Value::Null => self.set_value(index, None),
            value => {
                let value = T::from_value(&value).ok_or(Error::InvalidValue(value.type_name()))?;
                self.set_value(index, Some(value))
            }
        }
    }

    /// Writes `value` at `index`, or marks it absent for `None`.
    ///
    /// Writing a value clears any null marker at that position.
    pub fn set_value(&mut self, index: usize, value: Option<T>) -> Result<()> {
        let raw = self.try_resolve(index)?;
        let mut nulls = self.nulls.borrow_mut();
        match value {
            Some(value) => {
                self.data[raw].set(value);
                if let Some(bitmap) = nulls.as_mut() {
                    bitmap.clear_null(raw);
                }
            }
            None => {
                let capacity = self.data.len();
                nulls.get_or_insert_with(|| {
                    #[cfg(feature = "logging")]
                    log::debug!("allocating null bitmap for `{}`", self.field.name);
                    NullBitmap::with_capacity(capacity)
                }).set_null(raw);
            }
        }
        Ok(())
    }

    /// A view of this vector through `mapping`, sharing its storage.
    ///
    /// The positions of `mapping` are logical positions of `self`; a view of a view is
    /// flattened into a single mapping over the raw storage.
    pub fn with_view(&self, mapping: &IndexMapping) -> Result<Self> {
        let mapping = match &self.mapping {
            Some(parent) => parent.then(mapping)?,
            None => {
                mapping.check_within(self.data.len())?;
                mapping.clone()
            }
        };
        #[cfg(feature = "logging")]
        log::trace!("view of {} rows over `{}`", mapping.len(), self.field.name);
        let mapping = if mapping.is_identity() && mapping.len() == self.data.len() { None } else { Some(mapping) };
        Ok(Vector {
            field: self.field.clone(),
            data: Rc::clone(&self.data),
            nulls: Rc::clone(&self.nulls),
            mapping,
            nullability: PhantomData,
        })
    }

    /// The elements at the positions of `mapping`.
    ///
    /// Dense vectors return a view sharing storage. Nullable vectors return a copy with
    /// its own storage and bitmap, unaffected by later writes to `self`.
    pub fn select(&self, mapping: &IndexMapping) -> Result<Self> {
        N::select(self, mapping)
    }

    /// An independent copy of the logical elements, with no mapping.
    pub fn materialize(&self) -> Self {
        let len = self.len();
        let data = (0 .. len).map(|index| self.raw(index)).collect();
        let nulls = self.nulls.borrow().as_ref().map(|bitmap| {
            (0 .. len).map(|index| bitmap.is_null(self.resolve(index))).collect()
        });
        Self::build(self.field.clone(), data, nulls)
    }

    /// The same elements under a new name, sharing storage.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Vector {
            field: StructField::new(name, self.field.dtype),
            data: Rc::clone(&self.data),
            nulls: Rc::clone(&self.nulls),
            mapping: self.mapping.clone(),
            nullability: PhantomData,
        }
    }
}

impl<T: Float, N: Nullability> Vector<T, N> {
    /// Replaces NaN and infinite values with `replacement`, returning how many slots changed.
    ///
    /// Only positions reachable through the active mapping are visited, but the writes go to
    /// the shared storage. Null markers are left as they are.
    pub fn fill_invalid(&mut self, replacement: T) -> usize {
        let mut replaced = 0;
        for index in 0 .. self.len() {
            let slot = &self.data[self.resolve(index)];
            if slot.get().is_invalid() {
                slot.set(replacement);
                replaced += 1;
            }
        }
        #[cfg(feature = "logging")]
        log::debug!("replaced {} invalid values in `{}`", replaced, self.field.name);
        replaced
    }
}

impl<T: Primitive, N: Nullability> Len for Vector<T, N> {
    #[inline(always)]
    fn len(&self) -> usize {
        self.mapping.as_ref().map_or(self.data.len(), |mapping| mapping.len())
    }
}

impl<T: Primitive, N: Nullability> fmt::Debug for Vector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("field", &self.field)
            .field("data", &self.data)
            .field("nulls", &self.nulls.borrow())
            .field("mapping", &self.mapping)
            .finish()
    }
}

impl<T: Primitive, N: Nullability> fmt::Display for Vector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SHOWN: usize = 10;
        write!(f, "{}[", self.field)?;
        for (index, value) in self.iter().take(SHOWN).enumerate() {
            if index > 0 { f.write_str(", ")?; }
            match value {
                Some(value) => write!(f, "{:?}", value)?,
                None => f.write_str("null")?,
            }
        }
        if self.len() > SHOWN {
            write!(f, ", ... {} more", self.len() - SHOWN)?;
        }
        f.write_str("]")
    }
}
