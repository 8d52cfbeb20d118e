use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::corpus::sentence::{split_punctuation, word_key, Sentence};
use crate::selection::pool::{quantize, CandidatePool};
use crate::selection::{SearchPath, Selection, SelectionError, SelectionStrategy};
use crate::types::FlashcardDeck;

/// Ranks candidates by the share of their words the learner has not met yet
/// in any in-use flashcard.
#[derive(Debug, Clone, Default)]
pub struct HighestNewWordProportion {
    seen: BTreeSet<String>,
    benefit_shorter_sentences: bool,
}

impl HighestNewWordProportion {
    pub fn new(seen: BTreeSet<String>, benefit_shorter_sentences: bool) -> Self {
        Self {
            seen,
            benefit_shorter_sentences,
        }
    }

    /// Seen words are the deck keys of in-use cards plus every word of
    /// their sentences.
    pub fn from_previous(previous: &FlashcardDeck, benefit_shorter_sentences: bool) -> Self {
        let mut seen = BTreeSet::new();
        for (word, card) in previous.in_use() {
            seen.insert(word.to_string());
            let text = card.sentence_text();
            for piece in text.split_whitespace() {
                let (_, core, _) = split_punctuation(piece);
                let key = word_key(core);
                if !key.is_empty() {
                    seen.insert(key);
                }
            }
        }
        Self::new(seen, benefit_shorter_sentences)
    }

    /// Fraction of the sentence's distinct words that are not yet seen.
    pub fn new_word_proportion(&self, sentence: &Sentence) -> f64 {
        let keys: BTreeSet<String> = sentence
            .occurrences()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        if keys.is_empty() {
            return 0.0;
        }
        let unseen = keys.iter().filter(|key| !self.seen.contains(*key)).count();
        unseen as f64 / keys.len() as f64
    }
}

impl SelectionStrategy for HighestNewWordProportion {
    fn name(&self) -> &'static str {
        "highestProportionOfNewWords"
    }

    fn select(&self, pool: &CandidatePool<'_>, n: usize) -> Result<Selection, SelectionError> {
        pool.ensure_not_empty()?;
        if pool.len() <= n {
            return Ok(pool.take_all());
        }

        let scores: Vec<f64> = (0..pool.len())
            .map(|i| self.new_word_proportion(pool.sentence(i)))
            .collect();

        let in_use = pool.in_use();
        let mut members: Vec<usize> = in_use.iter().copied().take(n).collect();

        let mut ranked = pool.free();
        ranked.sort_by_key(|&i| {
            let length = if self.benefit_shorter_sentences { pool.token_len(i) } else { 0 };
            (Reverse(quantize(scores[i])), length, i)
        });
        let open = n - members.len();
        members.extend(ranked.into_iter().take(open));

        let contributions: Vec<(usize, f64)> = members.iter().map(|&i| (i, scores[i])).collect();
        let score: f64 = contributions.iter().map(|(_, s)| s).sum();

        Ok(Selection {
            word: pool.word().to_string(),
            picks: pool.ordered_picks(&contributions),
            score,
            path: SearchPath::Ranked,
        })
    }
}
