//! Flat boolean storage behind tensors.
//!
//! [`BoolStore`] is the logical view a tensor needs: read, write and resize
//! by flat index. [`BitSlice`] packs 64 booleans per word; `Vec<bool>`
//! spends a byte per element and exists as a plain alternative backing.

use core::fmt;

const WORD_BITS: usize = u64::BITS as usize;

/// A resizable sequence of booleans addressed by flat index.
pub trait BoolStore: Clone + fmt::Debug {
    /// A store of `len` elements, all `false`.
    fn zeroed(len: usize) -> Self;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    fn get(&self, i: usize) -> bool;

    /// Overwrite element `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    fn set(&mut self, i: usize, value: bool);

    /// Resize to exactly `len` elements. Elements below `min(old, len)` keep
    /// their value; new elements are `false`.
    fn set_len(&mut self, len: usize);

    /// Number of `true` elements.
    fn count_ones(&self) -> usize {
        (0..self.len()).filter(|&i| self.get(i)).count()
    }

    /// Overwrite every element with `value`, keeping the length.
    fn fill(&mut self, value: bool) {
        for i in 0..self.len() {
            self.set(i, value);
        }
    }
}

/// Packed bit storage, one bit per element in 64-bit words.
///
/// Bits past `len` in the last word are always zero, so growing only has to
/// append zeroed words and equality can compare words directly.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitSlice {
    words: Vec<u64>,
    len: usize,
}

impl BitSlice {
    /// `len` bits, all cleared.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; words_for(len)],
            len,
        }
    }

    /// An empty slice with room for at least `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: Vec::with_capacity(words_for(bits)),
            len: 0,
        }
    }

    /// Number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bits the backing buffer can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.words.capacity() * WORD_BITS
    }

    /// Bit `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    #[inline]
    pub fn get(&self, i: usize) -> bool {
        self.check(i);
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    /// Set bit `i` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    #[inline]
    pub fn set(&mut self, i: usize, value: bool) {
        self.check(i);
        let mask = 1u64 << (i % WORD_BITS);
        let word = &mut self.words[i / WORD_BITS];
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    /// Resize to `len` bits, keeping the common prefix and clearing new bits.
    ///
    /// Shrinking keeps the allocation; growing reuses it when it is large
    /// enough.
    pub fn set_len(&mut self, len: usize) {
        if len < self.len {
            self.words.truncate(words_for(len));
            self.len = len;
            self.clear_tail();
        } else {
            self.words.resize(words_for(len), 0);
            self.len = len;
        }
    }

    /// Zero the unused bits of the last word.
    fn clear_tail(&mut self) {
        let tail = self.len % WORD_BITS;
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << tail) - 1;
            }
        }
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Set every bit to `value`, keeping the length.
    pub fn fill(&mut self, value: bool) {
        self.words.fill(if value { u64::MAX } else { 0 });
        self.clear_tail();
    }

    /// Iterate over all bits in index order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1)
    }

    #[inline]
    fn check(&self, i: usize) {
        assert!(
            i < self.len,
            "bit index {i} out of range for length {}",
            self.len
        );
    }
}

impl fmt::Debug for BitSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitSlice[")?;
        for b in self.iter() {
            f.write_str(if b { "1" } else { "0" })?;
        }
        write!(f, "]")
    }
}

impl FromIterator<bool> for BitSlice {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut bits = Self::with_capacity(iter.size_hint().0);
        for b in iter {
            let i = bits.len;
            bits.set_len(i + 1);
            if b {
                bits.set(i, true);
            }
        }
        bits
    }
}

impl BoolStore for BitSlice {
    fn zeroed(len: usize) -> Self {
        Self::new(len)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, i: usize) -> bool {
        BitSlice::get(self, i)
    }

    fn set(&mut self, i: usize, value: bool) {
        BitSlice::set(self, i, value);
    }

    fn set_len(&mut self, len: usize) {
        BitSlice::set_len(self, len);
    }

    fn count_ones(&self) -> usize {
        BitSlice::count_ones(self)
    }

    fn fill(&mut self, value: bool) {
        BitSlice::fill(self, value);
    }
}

impl BoolStore for Vec<bool> {
    fn zeroed(len: usize) -> Self {
        vec![false; len]
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, i: usize) -> bool {
        self[i]
    }

    fn set(&mut self, i: usize, value: bool) {
        self[i] = value;
    }

    fn set_len(&mut self, len: usize) {
        self.resize(len, false);
    }

    fn fill(&mut self, value: bool) {
        <[bool]>::fill(self, value);
    }
}

#[inline]
fn words_for(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_new_is_cleared() {
        let b = BitSlice::new(70);
        assert_eq!(b.len(), 70);
        assert_eq!(b.count_ones(), 0);
        assert!(!b.get(69));
    }

    #[test]
    fn test_set_get_across_words() {
        let mut b = BitSlice::new(130);
        for i in [0, 63, 64, 127, 128, 129] {
            b.set(i, true);
        }
        assert!(b.get(63) && b.get(64) && b.get(129));
        assert!(!b.get(1) && !b.get(65));
        assert_eq!(b.count_ones(), 6);
        b.set(64, false);
        assert!(!b.get(64));
        assert_eq!(b.count_ones(), 5);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range() {
        BitSlice::new(8).get(8);
    }

    #[test]
    fn test_grow_preserves_prefix() {
        let mut b: BitSlice = [true, false, true].into_iter().collect();
        b.set_len(100);
        assert_eq!(b.len(), 100);
        assert!(b.get(0) && !b.get(1) && b.get(2));
        assert_eq!(b.count_ones(), 2);
    }

    #[test]
    fn test_shrink_then_grow_clears_tail() {
        let mut b = BitSlice::new(10);
        for i in 0..10 {
            b.set(i, true);
        }
        b.set_len(4);
        assert_eq!(b.count_ones(), 4);
        b.set_len(10);
        assert_eq!(b.iter().filter(|&x| x).count(), 4);
        assert!(!b.get(4) && !b.get(9));
    }

    #[test]
    fn test_shrink_keeps_capacity() {
        let mut b = BitSlice::new(1024);
        let cap = b.capacity();
        b.set_len(3);
        assert_eq!(b.capacity(), cap);
        b.set_len(1000);
        assert_eq!(b.capacity(), cap);
    }

    #[test]
    fn test_fill_keeps_tail_clear() {
        let mut b = BitSlice::new(70);
        b.fill(true);
        assert_eq!(b.count_ones(), 70);
        b.set_len(130);
        assert_eq!(b.count_ones(), 70);
        assert!(b.get(69) && !b.get(70) && !b.get(129));
        b.fill(false);
        assert_eq!(b.count_ones(), 0);
        assert_eq!(b.len(), 130);
    }

    #[test]
    fn test_store_count_and_fill() {
        let mut v = <Vec<bool> as BoolStore>::zeroed(4);
        BoolStore::fill(&mut v, true);
        BoolStore::set(&mut v, 2, false);
        assert_eq!(BoolStore::count_ones(&v), 3);
        let mut b = <BitSlice as BoolStore>::zeroed(4);
        BoolStore::fill(&mut b, true);
        assert_eq!(BoolStore::count_ones(&b), 4);
    }

    #[test]
    fn test_clone_independent() {
        let mut a = BitSlice::new(5);
        let mut c = a.clone();
        c.set(2, true);
        assert!(!a.get(2));
        a.set(4, true);
        assert!(!c.get(4));
    }

    #[test]
    fn test_debug_format() {
        let b: BitSlice = [true, false, true].into_iter().collect();
        assert_eq!(format!("{b:?}"), "BitSlice[101]");
    }

    #[test]
    fn test_vec_store() {
        let mut v = <Vec<bool> as BoolStore>::zeroed(3);
        BoolStore::set(&mut v, 1, true);
        BoolStore::set_len(&mut v, 5);
        assert_eq!(v, vec![false, true, false, false, false]);
    }

    proptest! {
        #[test]
        fn prop_resize_matches_vec(
            bits in prop::collection::vec(any::<bool>(), 0..200),
            new_len in 0usize..300,
        ) {
            let mut packed: BitSlice = bits.iter().copied().collect();
            let mut plain = bits.clone();
            packed.set_len(new_len);
            BoolStore::set_len(&mut plain, new_len);
            prop_assert_eq!(packed.iter().collect::<Vec<_>>(), plain);
        }
    }
}
