use std::cmp::Reverse;

use crate::corpus::{Candidate, CandidateSet, Corpus, Sentence, WordVector};
use crate::selection::{SearchPath, SelectedSentence, Selection, SelectionError};

/// A word's candidates together with the corpus they point into.
///
/// Strategies address candidates by their position in the pool (`0..len`),
/// which is also corpus order.
#[derive(Debug, Clone, Copy)]
pub struct CandidatePool<'a> {
    corpus: &'a Corpus,
    set: &'a CandidateSet,
}

impl<'a> CandidatePool<'a> {
    pub fn new(corpus: &'a Corpus, set: &'a CandidateSet) -> Self {
        Self { corpus, set }
    }

    pub fn word(&self) -> &'a str {
        self.set.word()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn candidate(&self, i: usize) -> &'a Candidate {
        &self.set.candidates()[i]
    }

    pub fn sentence(&self, i: usize) -> &'a Sentence {
        self.corpus.sentence(self.candidate(i).sentence)
    }

    pub fn vector(&self, i: usize) -> &'a WordVector {
        self.corpus.vector(self.candidate(i).sentence)
    }

    pub fn token_len(&self, i: usize) -> usize {
        self.sentence(i).token_len()
    }

    /// Positions of in-use candidates, ascending.
    pub fn in_use(&self) -> Vec<usize> {
        (0..self.len()).filter(|&i| self.candidate(i).in_use).collect()
    }

    /// Positions of candidates that are not in use, ascending.
    pub fn free(&self) -> Vec<usize> {
        (0..self.len()).filter(|&i| !self.candidate(i).in_use).collect()
    }

    pub(crate) fn ensure_not_empty(&self) -> Result<(), SelectionError> {
        if self.is_empty() {
            return Err(SelectionError::InsufficientCandidates {
                word: self.word().to_string(),
            });
        }
        Ok(())
    }

    /// Everything, in corpus order. Used when the pool has no more than `n`
    /// candidates.
    pub(crate) fn take_all(&self) -> Selection {
        let picks = (0..self.len()).map(|i| self.pick(i, 0.0)).collect();
        Selection {
            word: self.word().to_string(),
            picks,
            score: 0.0,
            path: SearchPath::Shortcut,
        }
    }

    pub(crate) fn pick(&self, i: usize, contribution: f64) -> SelectedSentence {
        let candidate = self.candidate(i);
        SelectedSentence {
            sentence: candidate.sentence,
            sentence_id: self.sentence(i).id().clone(),
            occurrence: candidate.occurrence,
            in_use: candidate.in_use,
            contribution,
        }
    }

    /// Picks ordered by contribution (descending), then corpus order.
    pub(crate) fn ordered_picks(&self, members: &[(usize, f64)]) -> Vec<SelectedSentence> {
        let mut members = members.to_vec();
        members.sort_by_key(|&(i, contribution)| (Reverse(quantize(contribution)), i));
        members
            .into_iter()
            .map(|(i, contribution)| self.pick(i, contribution))
            .collect()
    }
}

/// Scores within this distance of each other are considered equal.
pub const TIE_TOLERANCE: f64 = 1e-9;

/// Integer bucket of a score, giving sorts a total order that ignores
/// floating-point noise below [`TIE_TOLERANCE`].
pub(crate) fn quantize(score: f64) -> i64 {
    (score / TIE_TOLERANCE).round() as i64
}
