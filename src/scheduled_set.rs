//! Compact, order-independent set of job indices used as a node's "already
//! dispatched" marker.

pub mod prelude {
    pub use super::ScheduledSet;
}

const WORD_BITS: usize = u64::BITS as usize;

/// A bitset over job indices `0..num_jobs`.
///
/// Because the representation is a canonical vector of words (not an
/// insertion-ordered sequence), structural equality and the derived `Hash`
/// are automatically order-independent: two sets built by dispatching the
/// same jobs in different orders compare and hash identically.
#[derive(Clone, Debug, Default)]
#[derive(PartialEq, Eq, Hash)]
pub struct ScheduledSet {
    words: Vec<u64>,
}

impl ScheduledSet {
    /// The empty set, sized to hold indices up to `num_jobs - 1`.
    pub fn empty(num_jobs: usize) -> Self {
        let num_words = num_jobs.div_ceil(WORD_BITS).max(1);
        ScheduledSet { words: vec![0; num_words] }
    }

    pub fn contains(&self, index: usize) -> bool {
        let (word, bit) = Self::locate(index);
        self.words.get(word).is_some_and(|w| w & (1 << bit) != 0)
    }

    /// `self ⊇ indices`.
    pub fn includes(&self, indices: &[usize]) -> bool {
        indices.iter().all(|&i| self.contains(i))
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// `self ∪ {index}`.
    pub fn with(&self, index: usize) -> ScheduledSet {
        let mut next = self.clone();
        next.insert(index);
        next
    }

    pub fn insert(&mut self, index: usize) {
        let (word, bit) = Self::locate(index);
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1 << bit;
    }

    fn locate(index: usize) -> (usize, u32) {
        (index / WORD_BITS, (index % WORD_BITS) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_reflects_inserted_indices() {
        let mut s = ScheduledSet::empty(8);
        assert!(!s.contains(3));
        s.insert(3);
        assert!(s.contains(3));
        assert!(!s.contains(4));
    }

    #[test]
    fn includes_checks_subset() {
        let mut s = ScheduledSet::empty(8);
        s.insert(1);
        s.insert(2);
        assert!(s.includes(&[1, 2]));
        assert!(!s.includes(&[1, 2, 3]));
        assert!(s.includes(&[]));
    }

    #[test]
    fn equality_and_hash_are_order_independent() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut a = ScheduledSet::empty(65);
        a.insert(1);
        a.insert(64);

        let mut b = ScheduledSet::empty(65);
        b.insert(64);
        b.insert(1);

        assert_eq!(a, b);

        let hash = |s: &ScheduledSet| {
            let mut h = DefaultHasher::new();
            s.hash(&mut h);
            h.finish()
        };
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn len_counts_set_bits_across_words() {
        let mut s = ScheduledSet::empty(130);
        s.insert(0);
        s.insert(63);
        s.insert(64);
        s.insert(129);
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn with_does_not_mutate_the_original() {
        let s = ScheduledSet::empty(8);
        let s2 = s.with(2);
        assert!(!s.contains(2));
        assert!(s2.contains(2));
    }
}
