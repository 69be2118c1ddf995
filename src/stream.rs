//! Lazy, single-pass projections of a vector's present values.

use std::cell::{Cell, RefCell};
use std::iter::{FusedIterator, Map};
use std::rc::Rc;

use crate::bitmap::NullBitmap;
use crate::index::IndexMapping;
use crate::primitive::Primitive;

/// The present values of a vector, in logical order, skipping nulls.
///
/// The iterator holds its own references to the vector's storage and reads each slot
/// when it is pulled, so writes made between pulls are observed. Once exhausted it stays
/// exhausted; ask the vector for a new one to start over.
pub struct Present<T> {
    data: Rc<[Cell<T>]>,
    nulls: Rc<RefCell<Option<NullBitmap>>>,
    mapping: Option<IndexMapping>,
    index: usize,
    len: usize,
}

impl<T> Present<T> {
    pub(crate) fn new(data: Rc<[Cell<T>]>, nulls: Rc<RefCell<Option<NullBitmap>>>, mapping: Option<IndexMapping>, len: usize) -> Self {
        Present { data, nulls, mapping, index: 0, len }
    }
}

impl<T: Primitive> Iterator for Present<T> {
    type Item = T;
    #[inline]
    fn next(&mut self) -> Option<T> {
        let nulls = self.nulls.borrow();
        while self.index < self.len {
            let raw = match &self.mapping {
                Some(mapping) => mapping.resolve(self.index),
                None => self.index,
            };
            self.index += 1;
            if !nulls.as_ref().is_some_and(|bitmap| bitmap.is_null(raw)) {
                return Some(self.data[raw].get());
            }
        }
        None
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.len - self.index))
    }
}

impl<T: Primitive> FusedIterator for Present<T> { }

/// Present values widened to `f64`.
pub type Doubles<T> = Map<Present<T>, fn(T) -> f64>;
/// Present values coerced to `i64`.
pub type Longs<T> = Map<Present<T>, fn(T) -> i64>;
/// Present values coerced to `i32`.
pub type Ints<T> = Map<Present<T>, fn(T) -> i32>;

#[cfg(test)]
mod test {
    use crate::bitmap::NullBitmap;
    use crate::index::IndexMapping;
    use crate::{LongVector, NullableShortVector};

    #[test]
    fn skips_nulls() {
        let vector = NullableShortVector::new("s", vec![1, 2, 3, 4], NullBitmap::from_positions([1, 3]));
        assert_eq!(vector.present().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(vector.ints().sum::<i32>(), 4);
        assert_eq!(vector.doubles().collect::<Vec<_>>(), vec![1.0, 3.0]);
    }

    #[test]
    fn honors_mapping() {
        let vector = LongVector::new("l", vec![10, 20, 30]);
        let view = vector.with_view(&IndexMapping::explicit(vec![2, 2, 0])).unwrap();
        assert_eq!(view.longs().collect::<Vec<_>>(), vec![30, 30, 10]);
    }

    #[test]
    fn single_pass() {
        let vector = LongVector::new("l", vec![1, 2]);
        let mut stream = vector.doubles();
        assert_eq!(stream.by_ref().count(), 2);
        assert_eq!(stream.next(), None);
        // A fresh stream starts over.
        assert_eq!(vector.doubles().count(), 2);
    }

    #[test]
    fn observes_writes_between_pulls() {
        let mut vector = LongVector::new("l", vec![1, 2, 3]);
        let mut stream = vector.present();
        assert_eq!(stream.next(), Some(1));
        vector.set_value(1, None).unwrap();
        vector.set_value(2, Some(9)).unwrap();
        assert_eq!(stream.collect::<Vec<_>>(), vec![9]);
    }
}
