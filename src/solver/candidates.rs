//! Candidate set for a single game
//!
//! Kept as a sorted list of word ids so that iteration follows vocabulary
//! order and intersecting with an index bucket is a linear merge.

use crate::core::{Vocabulary, WordId};

/// Words still consistent with every piece of feedback seen so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    ids: Vec<WordId>,
}

impl CandidateSet {
    /// Every word in the vocabulary
    #[must_use]
    pub fn full(vocab: &Vocabulary) -> Self {
        Self {
            ids: vocab.ids().collect(),
        }
    }

    /// Set from arbitrary ids; sorted and deduplicated
    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = WordId>) -> Self {
        let mut ids: Vec<WordId> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, id: WordId) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    /// Ids in vocabulary order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = WordId> + '_ {
        self.ids.iter().copied()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[WordId] {
        &self.ids
    }

    /// Drop a word; returns whether it was present
    pub fn remove(&mut self, id: WordId) -> bool {
        match self.ids.binary_search(&id) {
            Ok(pos) => {
                self.ids.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Keep only ids that also appear in `bucket`, which must be sorted
    pub fn retain_in(&mut self, bucket: &[WordId]) {
        debug_assert!(bucket.windows(2).all(|w| w[0] < w[1]));

        let mut rest = bucket.iter().peekable();
        self.ids.retain(|id| {
            while rest.next_if(|&b| b < id).is_some() {}
            rest.peek().is_some_and(|&b| b == id)
        });
    }
}
