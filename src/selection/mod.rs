pub mod combinations;
pub mod dissimilarity;
pub mod most_different;
pub mod new_words;
pub mod pool;

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::corpus::{CandidateSet, Corpus, Occurrence};
use crate::types::{FlashcardDeck, SentenceId};
pub use combinations::{combination_count, Combinations};
pub use dissimilarity::{cosine_dissimilarity, cosine_similarity, DissimilarityMatrix};
pub use most_different::MostDifferent;
pub use new_words::HighestNewWordProportion;
pub use pool::{CandidatePool, TIE_TOLERANCE};

/// How a Selection was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchPath {
    /// The pool was no bigger than `n`; everything was taken.
    Shortcut,
    Exhaustive,
    /// Greedy fallback above the combination cap.
    Approximate,
    Ranked,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedSentence {
    pub sentence: usize,
    pub sentence_id: SentenceId,
    pub occurrence: Occurrence,
    pub in_use: bool,
    /// This sentence's share of the Selection's score.
    pub contribution: f64,
}

/// The sentences chosen for one word, best contributors first.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub word: String,
    pub picks: Vec<SelectedSentence>,
    pub score: f64,
    pub path: SearchPath,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("No candidate sentences for word {word:?}")]
    InsufficientCandidates { word: String },
}

/// A way of choosing `n` sentences from a word's pool.
pub trait SelectionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn select(&self, pool: &CandidatePool<'_>, n: usize) -> Result<Selection, SelectionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlgorithmKind {
    #[default]
    MostDifferent,
    HighestProportionOfNewWords,
}

impl AlgorithmKind {
    /// Build the strategy once for a whole run. `previous` feeds strategies
    /// that look at what the learner already has.
    pub fn resolve(
        self,
        config: &SelectionConfig,
        previous: &FlashcardDeck,
    ) -> Box<dyn SelectionStrategy> {
        match self {
            AlgorithmKind::MostDifferent => Box::new(MostDifferent::from_config(config)),
            AlgorithmKind::HighestProportionOfNewWords => Box::new(
                HighestNewWordProportion::from_previous(previous, config.benefit_shorter_sentences),
            ),
        }
    }
}

// Serializable
// Comparable
// Explicit defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionConfig {
    #[serde(default, rename = "clozeChoosingAlgorithm")]
    pub algorithm: AlgorithmKind,
    #[serde(default = "default_per_word", rename = "numFlashcardsPerWord")]
    pub per_word: usize,
    #[serde(default)]
    pub benefit_shorter_sentences: bool,
    /// Above this many combinations the exhaustive search gives way to a
    /// greedy approximation.
    #[serde(default = "default_max_combinations")]
    pub max_combinations: u64,
}

fn default_per_word() -> usize {
    3
}

fn default_max_combinations() -> u64 {
    1_000_000
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmKind::default(),
            per_word: default_per_word(),
            benefit_shorter_sentences: false,
            max_combinations: default_max_combinations(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectionOutcome {
    pub selections: BTreeMap<String, Selection>,
    pub failures: Vec<(String, SelectionError)>,
}

/// Run `strategy` over every candidate set. Words are independent, so with
/// `parallel` they are spread over the rayon pool; the merged result is the
/// same either way.
pub fn select_all(
    strategy: &dyn SelectionStrategy,
    corpus: &Corpus,
    sets: &[CandidateSet],
    n: usize,
    parallel: bool,
) -> SelectionOutcome {
    let run = |set: &CandidateSet| {
        let pool = CandidatePool::new(corpus, set);
        (set.word().to_string(), strategy.select(&pool, n))
    };

    let results: Vec<(String, Result<Selection, SelectionError>)> = if parallel {
        sets.par_iter().map(run).collect()
    } else {
        sets.iter().map(run).collect()
    };

    let mut outcome = SelectionOutcome::default();
    for (word, result) in results {
        match result {
            Ok(selection) => {
                tracing::debug!(
                    word = %word,
                    strategy = strategy.name(),
                    path = ?selection.path,
                    picks = selection.len(),
                    "selected sentences"
                );
                outcome.selections.insert(word, selection);
            }
            Err(error) => outcome.failures.push((word, error)),
        }
    }
    outcome
}
