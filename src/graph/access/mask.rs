//! Dense vertex masks.
//!
//! `VertexMask` is the non-atomic sibling of a word-packed visited bitset: one bit
//! per vertex, packed into `usize` words. It backs every per-vertex flag the cycle
//! engine keeps (active set, component membership, blocked flags, BFS visited
//! marks), so copying the whole search state at a fork point is a `memcpy` of
//! `n / usize::BITS` words rather than `n` bytes.

/// A fixed-size, word-packed set of vertex ids in `0..len`.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct VertexMask {
    bits: usize,
    words: Vec<usize>,
}

impl VertexMask {
    /// Creates a mask over `bits` vertices with every bit cleared.
    pub fn new(bits: usize) -> Self {
        let words = vec![0usize; bits.div_ceil(usize::BITS as usize)];
        Self { bits, words }
    }

    /// Creates a mask over `bits` vertices with every bit set.
    pub fn full(bits: usize) -> Self {
        let mut mask = Self::new(bits);
        mask.fill();
        mask
    }

    /// Creates a mask over `bits` vertices containing exactly `members`.
    ///
    /// # Panics
    /// Panics if any member is `>= bits`.
    pub fn from_members(bits: usize, members: &[usize]) -> Self {
        let mut mask = Self::new(bits);
        for &v in members {
            mask.insert(v);
        }
        mask
    }

    /// Number of addressable vertices.
    #[inline]
    pub fn len_bits(&self) -> usize {
        self.bits
    }

    /// Returns whether `v` is set.
    ///
    /// # Panics
    /// Panics if `v >= len_bits()`.
    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        assert!(v < self.bits, "vertex {v} out of bounds for mask of {}", self.bits);
        // SAFETY: index checked above.
        unsafe { self.contains_unchecked(v) }
    }

    /// # Safety
    /// Caller must ensure `v < len_bits()`.
    #[inline(always)]
    pub unsafe fn contains_unchecked(&self, v: usize) -> bool {
        let (word, mask) = bit_word_mask(v);
        // SAFETY: word index derived from v < self.bits.
        (unsafe { *self.words.get_unchecked(word) } & mask) != 0
    }

    /// Sets `v` and returns `true` iff it was previously cleared.
    ///
    /// # Panics
    /// Panics if `v >= len_bits()`.
    #[inline]
    pub fn insert(&mut self, v: usize) -> bool {
        assert!(v < self.bits, "vertex {v} out of bounds for mask of {}", self.bits);
        let (word, mask) = bit_word_mask(v);
        let prev = self.words[word];
        self.words[word] = prev | mask;
        prev & mask == 0
    }

    /// Clears `v` and returns `true` iff it was previously set.
    ///
    /// # Panics
    /// Panics if `v >= len_bits()`.
    #[inline]
    pub fn remove(&mut self, v: usize) -> bool {
        assert!(v < self.bits, "vertex {v} out of bounds for mask of {}", self.bits);
        let (word, mask) = bit_word_mask(v);
        let prev = self.words[word];
        self.words[word] = prev & !mask;
        prev & mask != 0
    }

    /// Clears every bit.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Sets every bit in `0..len_bits()`.
    pub fn fill(&mut self) {
        self.words.fill(usize::MAX);
        let tail = self.bits % usize::BITS as usize;
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last = (1usize << tail) - 1;
            }
        }
    }

    /// Clears every bit below `threshold`.
    pub fn clear_below(&mut self, threshold: usize) {
        let threshold = threshold.min(self.bits);
        let word_bits = usize::BITS as usize;
        let full = threshold / word_bits;
        self.words[..full].fill(0);
        let tail = threshold % word_bits;
        if tail != 0 {
            self.words[full] &= !((1usize << tail) - 1);
        }
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if no bit is set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Iterates set bits in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let word_bits = usize::BITS as usize;
        self.words.iter().enumerate().flat_map(move |(i, &word)| {
            let mut rest = word;
            core::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let tz = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some(i * word_bits + tz)
            })
        })
    }
}

#[inline(always)]
fn bit_word_mask(bit: usize) -> (usize, usize) {
    // `usize::BITS` is a power of two, so the division lowers to shifts.
    let word_bits = usize::BITS as usize;
    (bit / word_bits, 1usize << (bit % word_bits))
}
