//! A growable bitmap of null markers.

/// One bit per raw position; a set bit means the value at that position is absent.
///
/// Bits are packed little-endian into `u64` words: position `i` is bit `i % 64` of word
/// `i / 64`. Positions past the last allocated word read as not null, and setting one
/// grows the bitmap. The bitmap never shrinks.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct NullBitmap {
    words: Vec<u64>,
}

impl NullBitmap {
    /// An empty bitmap, with no null positions.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty bitmap with room for `bits` positions before it must grow.
    pub fn with_capacity(bits: usize) -> Self {
        NullBitmap { words: vec![0; bits.div_ceil(64)] }
    }

    /// A bitmap with exactly the listed positions marked null.
    pub fn from_positions(positions: impl IntoIterator<Item = usize>) -> Self {
        let mut bitmap = Self::new();
        for position in positions {
            bitmap.set_null(position);
        }
        bitmap
    }

    #[inline(always)]
    pub fn is_null(&self, index: usize) -> bool {
        match self.words.get(index / 64) {
            Some(word) => (word >> (index % 64)) & 1 == 1,
            None => false,
        }
    }

    #[inline]
    pub fn set_null(&mut self, index: usize) {
        let block = index / 64;
        if block >= self.words.len() {
            self.words.resize(block + 1, 0);
        }
        self.words[block] |= 1 << (index % 64);
    }

    #[inline]
    pub fn clear_null(&mut self, index: usize) {
        if let Some(word) = self.words.get_mut(index / 64) {
            *word &= !(1 << (index % 64));
        }
    }

    /// Marks or unmarks `index`.
    #[inline]
    pub fn set(&mut self, index: usize, null: bool) {
        if null { self.set_null(index) } else { self.clear_null(index) }
    }

    /// Unmarks every position, keeping the allocation.
    pub fn clear_all(&mut self) {
        for word in self.words.iter_mut() {
            *word = 0;
        }
    }

    /// The number of positions marked null.
    pub fn null_count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Iterates over the null positions in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(block, &word)| {
            let mut word = word;
            std::iter::from_fn(move || {
                if word == 0 {
                    None
                } else {
                    let bit = word.trailing_zeros() as usize;
                    word &= word - 1;
                    Some(block * 64 + bit)
                }
            })
        })
    }
}

// Equality is over the marked positions, not the allocation.
impl PartialEq for NullBitmap {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}
impl Eq for NullBitmap { }

impl FromIterator<bool> for NullBitmap {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bitmap = Self::new();
        for (index, null) in iter.into_iter().enumerate() {
            if null {
                bitmap.set_null(index);
            }
        }
        bitmap
    }
}
