//! Fixed-capacity bit-vector over the key identifier space.

use super::keys::{KEY_COUNT, KeyCode};

const WORD_BITS: usize = u64::BITS as usize;
const WORDS: usize = KEY_COUNT / WORD_BITS;

static_assertions::const_assert_eq!(KEY_COUNT % WORD_BITS, 0);
static_assertions::assert_eq_size!(KeySet, [u8; KEY_COUNT / 8]);

/// A set of key identifiers, one bit per key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeySet {
    words: [u64; WORDS],
}

impl KeySet {
    /// The empty set.
    pub const EMPTY: KeySet = KeySet { words: [0; WORDS] };

    pub const fn new() -> Self {
        Self::EMPTY
    }

    #[inline]
    pub fn insert(&mut self, key: KeyCode) {
        let i = key.index();
        self.words[i / WORD_BITS] |= 1u64 << (i % WORD_BITS);
    }

    #[inline]
    pub fn remove(&mut self, key: KeyCode) {
        let i = key.index();
        self.words[i / WORD_BITS] &= !(1u64 << (i % WORD_BITS));
    }

    #[inline]
    pub fn contains(&self, key: KeyCode) -> bool {
        self.contains_index(key.index())
    }

    /// Test a raw identifier. Out-of-range identifiers are never members.
    #[inline]
    pub fn contains_index(&self, index: usize) -> bool {
        if index >= KEY_COUNT {
            return false;
        }
        self.words[index / WORD_BITS] & (1u64 << (index % WORD_BITS)) != 0
    }

    pub fn clear(&mut self) {
        self.words = [0; WORDS];
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn union(&self, other: &KeySet) -> KeySet {
        let mut words = self.words;
        for (w, o) in words.iter_mut().zip(other.words.iter()) {
            *w |= *o;
        }
        KeySet { words }
    }

    /// `true` when every member of `self` is also in `other`.
    pub fn is_subset(&self, other: &KeySet) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(s, o)| s & !o == 0)
    }

    /// `true` when the two sets share at least one key.
    pub fn intersects(&self, other: &KeySet) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .any(|(s, o)| s & o != 0)
    }

    /// Iterate over the member keys in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = KeyCode> + '_ {
        (0..KEY_COUNT)
            .filter(|&i| self.contains_index(i))
            .filter_map(|i| KeyCode::from_code(i as u16))
    }
}

impl FromIterator<KeyCode> for KeySet {
    fn from_iter<I: IntoIterator<Item = KeyCode>>(iter: I) -> Self {
        let mut set = KeySet::new();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

impl std::fmt::Debug for KeySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
