//! Common traits that are re-used throughout the crate.

/// A type with a length.
pub trait Len {
    /// The number of contained elements.
    fn len(&self) -> usize;
    /// Whether this contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
impl<L: Len + ?Sized> Len for &L {
    #[inline(always)] fn len(&self) -> usize { L::len(*self) }
}
impl<L: Len + ?Sized> Len for &mut L {
    #[inline(always)] fn len(&self) -> usize { L::len(*self) }
}
impl<L: Len + ?Sized> Len for Box<L> {
    #[inline(always)] fn len(&self) -> usize { L::len(self) }
}
impl<T> Len for Vec<T> {
    #[inline(always)] fn len(&self) -> usize { self.len() }
}
impl<T> Len for [T] {
    #[inline(always)] fn len(&self) -> usize { <[T]>::len(self) }
}

/// Panics with a uniform message when `index` is not below `len`.
#[inline(always)]
#[track_caller]
pub(crate) fn check_bounds(index: usize, len: usize) {
    if index >= len {
        panic!("index out of bounds: the len is {} but the index is {}", len, index);
    }
}
