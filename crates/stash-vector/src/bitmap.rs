//! Packed occupancy bitmap.
//!
//! [`Bitmap`] tracks which vector slots hold live elements, one bit per
//! slot. The first 128 bits live inline (one default growth increment),
//! so small vectors never pay for a second heap allocation.

use smallvec::{CollectionAllocErr, SmallVec};

/// Bits per storage word.
pub const WORD_BITS: usize = u64::BITS as usize;

const INLINE_WORDS: usize = 2;

/// A packed bit array, resized in lockstep with its owning vector.
///
/// `set`, `clear` and `check` do no bounds checking of their own: the
/// owner sizes the bitmap to cover every slot before touching it. Slice
/// indexing still panics on a word past the end.
#[derive(Clone, Debug, Default)]
pub struct Bitmap {
    words: SmallVec<[u64; INLINE_WORDS]>,
}

impl Bitmap {
    /// Create an empty bitmap with no words.
    pub fn new() -> Self {
        Self {
            words: SmallVec::new(),
        }
    }

    /// Number of words needed to cover `slots` bits.
    #[inline]
    pub fn words_for(slots: usize) -> usize {
        slots.div_ceil(WORD_BITS)
    }

    #[inline]
    fn locate(index: usize) -> (usize, u64) {
        (index / WORD_BITS, 1u64 << (index % WORD_BITS))
    }

    /// Mark `index` live.
    #[inline]
    pub fn set(&mut self, index: usize) {
        let (word, mask) = Self::locate(index);
        debug_assert!(word < self.words.len(), "bit {index} past bitmap end");
        self.words[word] |= mask;
    }

    /// Mark `index` vacant.
    #[inline]
    pub fn clear(&mut self, index: usize) {
        let (word, mask) = Self::locate(index);
        debug_assert!(word < self.words.len(), "bit {index} past bitmap end");
        self.words[word] &= !mask;
    }

    /// Whether `index` is live.
    #[inline]
    pub fn check(&self, index: usize) -> bool {
        let (word, mask) = Self::locate(index);
        debug_assert!(word < self.words.len(), "bit {index} past bitmap end");
        self.words[word] & mask != 0
    }

    /// Reserve storage for `slots` bits without changing the word count.
    ///
    /// Lets the owner make both of its allocations before committing
    /// either one.
    pub fn try_reserve_for(&mut self, slots: usize) -> Result<(), CollectionAllocErr> {
        let target = Self::words_for(slots);
        match target.checked_sub(self.words.len()) {
            Some(additional) if additional > 0 => self.words.try_reserve_exact(additional),
            _ => Ok(()),
        }
    }

    /// Resize to cover exactly `slots` bits.
    ///
    /// New words are zero. On shrink, bits at or past `slots` are cleared
    /// and spilled storage is released.
    pub fn resize_for(&mut self, slots: usize) {
        let target = Self::words_for(slots);
        let shrinking = target < self.words.len();
        self.words.resize(target, 0);
        let tail = slots % WORD_BITS;
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << tail) - 1;
            }
        }
        if shrinking {
            self.words.shrink_to_fit();
        }
    }

    /// Clear every bit, keeping the storage.
    pub fn reset(&mut self) {
        self.words.fill(0);
    }

    /// Index of the first set bit in `[from, limit)`.
    pub fn next_set(&self, from: usize, limit: usize) -> Option<usize> {
        let limit = limit.min(self.bit_capacity());
        if from >= limit {
            return None;
        }
        let mut word_idx = from / WORD_BITS;
        let mut word = self.words[word_idx] & (u64::MAX << (from % WORD_BITS));
        loop {
            if word != 0 {
                let index = word_idx * WORD_BITS + word.trailing_zeros() as usize;
                return (index < limit).then_some(index);
            }
            word_idx += 1;
            if word_idx * WORD_BITS >= limit {
                return None;
            }
            word = self.words[word_idx];
        }
    }

    /// Index of the last set bit in `[0, limit)`.
    ///
    /// Returns `None` for `limit == 0` rather than wrapping below zero.
    pub fn prev_set(&self, limit: usize) -> Option<usize> {
        let limit = limit.min(self.bit_capacity());
        let last = limit.checked_sub(1)?;
        let mut word_idx = last / WORD_BITS;
        let mut word = self.words[word_idx] & (u64::MAX >> (WORD_BITS - 1 - last % WORD_BITS));
        loop {
            if word != 0 {
                let bit = WORD_BITS - 1 - word.leading_zeros() as usize;
                return Some(word_idx * WORD_BITS + bit);
            }
            word_idx = word_idx.checked_sub(1)?;
            word = self.words[word_idx];
        }
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Number of allocated words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Number of bits the current words can hold.
    pub fn bit_capacity(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    /// Whether the words have spilled from inline storage to the heap.
    pub fn spilled(&self) -> bool {
        self.words.spilled()
    }
}
