//! Index mappings from logical positions to raw storage positions.
//!
//! A mapping is immutable once built and cheap to clone: explicit positions are held
//! behind an `Rc`, so every view built from the same selection shares one allocation.
//! Mappings compose by flattening, so a view of a view resolves in one step.

use std::ops::Range;
use std::rc::Rc;

use crate::common::{check_bounds, Len};
use crate::error::{Error, Result};

/// A map from `[0, len)` to raw positions.
///
/// Explicit positions may repeat (fan-out, resampling) and need not be sorted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexMapping {
    repr: Repr,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Repr {
    /// `i -> i` for `i` in `[0, len)`.
    Identity(usize),
    /// `i -> start + i` for `i` in `[0, end - start)`.
    Range(Range<usize>),
    /// `i -> positions[i]`, with `max` the largest position.
    Explicit { positions: Rc<[usize]>, max: Option<usize> },
}

impl IndexMapping {
    /// The mapping that leaves positions unchanged.
    pub fn identity(len: usize) -> Self {
        IndexMapping { repr: Repr::Identity(len) }
    }

    /// A contiguous slice of raw positions.
    ///
    /// # Panics
    ///
    /// Panics if `range.start > range.end`.
    pub fn range(range: Range<usize>) -> Self {
        assert!(range.start <= range.end, "range start {} exceeds end {}", range.start, range.end);
        IndexMapping { repr: Repr::Range(range) }
    }

    /// An explicit sequence of raw positions.
    pub fn explicit(positions: impl Into<Vec<usize>>) -> Self {
        let positions: Vec<usize> = positions.into();
        let max = positions.iter().max().copied();
        IndexMapping { repr: Repr::Explicit { positions: positions.into(), max } }
    }

    /// The positions at which `mask` is `true`.
    pub fn from_mask(mask: &[bool]) -> Self {
        mask.iter().enumerate().filter(|(_, keep)| **keep).map(|(index, _)| index).collect()
    }

    #[inline(always)]
    pub fn is_identity(&self) -> bool {
        matches!(self.repr, Repr::Identity(_))
    }

    /// The largest raw position this mapping can produce, or `None` if it is empty.
    pub fn max_position(&self) -> Option<usize> {
        match &self.repr {
            Repr::Identity(len) => len.checked_sub(1),
            Repr::Range(range) => if range.is_empty() { None } else { Some(range.end - 1) },
            Repr::Explicit { max, .. } => *max,
        }
    }

    /// Checks that every position this mapping produces is below `len`.
    pub fn check_within(&self, len: usize) -> Result<()> {
        match self.max_position() {
            Some(max) if max >= len => Err(Error::IndexOutOfBounds { index: max, len }),
            _ => Ok(()),
        }
    }

    /// The raw position for `index`, or `None` if `index` is out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<usize> {
        match &self.repr {
            Repr::Identity(len) => (index < *len).then_some(index),
            Repr::Range(range) => (index < range.len()).then(|| range.start + index),
            Repr::Explicit { positions, .. } => positions.get(index).copied(),
        }
    }

    /// The raw position for `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline(always)]
    #[track_caller]
    pub fn resolve(&self, index: usize) -> usize {
        match &self.repr {
            Repr::Identity(len) => { check_bounds(index, *len); index }
            Repr::Range(range) => { check_bounds(index, range.len()); range.start + index }
            Repr::Explicit { positions, .. } => { check_bounds(index, positions.len()); positions[index] }
        }
    }

    /// The raw positions, in logical order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { mapping: self, index: 0 }
    }

    /// Flattens `child`, whose positions are logical positions of `self`, into one mapping.
    ///
    /// The result resolves `i` to `self.resolve(child.resolve(i))`.
    pub fn then(&self, child: &IndexMapping) -> Result<IndexMapping> {
        child.check_within(self.len())?;
        // Past the check, every child position is a valid logical position of `self`.
        let repr = match (&self.repr, &child.repr) {
            (Repr::Identity(_), _) => child.repr.clone(),
            (Repr::Range(outer), Repr::Identity(len)) => Repr::Range(outer.start .. outer.start + len),
            (Repr::Range(outer), Repr::Range(inner)) if inner.is_empty() => Repr::Range(outer.start .. outer.start),
            (Repr::Range(outer), Repr::Range(inner)) => Repr::Range(outer.start + inner.start .. outer.start + inner.end),
            (Repr::Range(outer), Repr::Explicit { positions, max }) => Repr::Explicit {
                positions: positions.iter().map(|p| outer.start + p).collect(),
                max: max.map(|max| outer.start + max),
            },
            (Repr::Explicit { positions, .. }, _) => {
                return Ok(child.iter().map(|p| positions[p]).collect());
            }
        };
        Ok(IndexMapping { repr })
    }
}

impl Len for IndexMapping {
    #[inline(always)]
    fn len(&self) -> usize {
        match &self.repr {
            Repr::Identity(len) => *len,
            Repr::Range(range) => range.len(),
            Repr::Explicit { positions, .. } => positions.len(),
        }
    }
}

impl From<Vec<usize>> for IndexMapping {
    fn from(positions: Vec<usize>) -> Self { Self::explicit(positions) }
}
impl From<&[usize]> for IndexMapping {
    fn from(positions: &[usize]) -> Self { Self::explicit(positions) }
}
impl From<Range<usize>> for IndexMapping {
    fn from(range: Range<usize>) -> Self { Self::range(range) }
}
impl FromIterator<usize> for IndexMapping {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::explicit(iter.into_iter().collect::<Vec<_>>())
    }
}

/// An iterator over the raw positions of a mapping.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    mapping: &'a IndexMapping,
    index: usize,
}

impl Iterator for Iter<'_> {
    type Item = usize;
    #[inline]
    fn next(&mut self) -> Option<usize> {
        let result = self.mapping.get(self.index);
        if result.is_some() {
            self.index += 1;
        }
        result
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.mapping.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> { }
impl std::iter::FusedIterator for Iter<'_> { }

impl<'a> IntoIterator for &'a IndexMapping {
    type Item = usize;
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Iter<'a> { self.iter() }
}
