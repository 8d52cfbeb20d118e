//! Most-different subset selection.
//!
//! Chooses the `n` candidates whose summed pairwise cosine dissimilarity is
//! largest. In-use candidates are always part of the subset when they fit.
//! With `benefit_shorter_sentences`, subsets that tie on dissimilarity are
//! decided by the smaller total token length. Any remaining tie goes to the
//! subset that comes first in lexicographic index order.

use crate::selection::combinations::{combination_count, Combinations};
use crate::selection::dissimilarity::DissimilarityMatrix;
use crate::selection::pool::{CandidatePool, TIE_TOLERANCE};
use crate::selection::{SearchPath, Selection, SelectionConfig, SelectionError, SelectionStrategy};

#[derive(Debug, Clone)]
pub struct MostDifferent {
    benefit_shorter_sentences: bool,
    max_combinations: u64,
}

impl Default for MostDifferent {
    fn default() -> Self {
        Self::from_config(&SelectionConfig::default())
    }
}

impl MostDifferent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &SelectionConfig) -> Self {
        Self {
            benefit_shorter_sentences: config.benefit_shorter_sentences,
            max_combinations: config.max_combinations,
        }
    }

    /// Break dissimilarity ties in favour of shorter sentences.
    pub fn with_shorter_sentences(mut self, enabled: bool) -> Self {
        self.benefit_shorter_sentences = enabled;
        self
    }

    /// Largest number of combinations searched exhaustively.
    pub fn with_max_combinations(mut self, cap: u64) -> Self {
        self.max_combinations = cap;
        self
    }

    /// Whether (`score`, `length`) should replace the current best.
    /// Only strict improvements count, so earlier candidates win ties.
    fn prefers(&self, score: f64, length: usize, best_score: f64, best_length: usize) -> bool {
        if score > best_score + TIE_TOLERANCE {
            return true;
        }
        if score < best_score - TIE_TOLERANCE {
            return false;
        }
        self.benefit_shorter_sentences && length < best_length
    }

    /// `forced` plus the best `k` of `free`.
    fn search(
        &self,
        word: &str,
        matrix: &DissimilarityMatrix,
        lengths: &[usize],
        forced: &[usize],
        free: &[usize],
        k: usize,
    ) -> (Vec<usize>, SearchPath) {
        if k == 0 {
            return (forced.to_vec(), SearchPath::Exhaustive);
        }

        let count = combination_count(free.len(), k);
        if count > self.max_combinations {
            tracing::warn!(
                word,
                combinations = count,
                cap = self.max_combinations,
                "combination count above cap, using greedy approximation"
            );
            let members = self.greedy(matrix, lengths, forced, free, k);
            return (members, SearchPath::Approximate);
        }

        let members = self.exhaustive(matrix, lengths, forced, free, k);
        (members, SearchPath::Exhaustive)
    }

    fn exhaustive(
        &self,
        matrix: &DissimilarityMatrix,
        lengths: &[usize],
        forced: &[usize],
        free: &[usize],
        k: usize,
    ) -> Vec<usize> {
        // Pairs among the forced members are the same for every combination.
        let base = matrix.total(forced);
        let base_length: usize = forced.iter().map(|&i| lengths[i]).sum();
        let gains: Vec<f64> = free
            .iter()
            .map(|&f| forced.iter().map(|&x| matrix.get(f, x)).sum())
            .collect();

        let mut best: Option<(Vec<usize>, f64, usize)> = None;
        for combination in Combinations::new(free.len(), k) {
            let mut total = base;
            let mut length = base_length;
            for (a, &ci) in combination.iter().enumerate() {
                total += gains[ci];
                length += lengths[free[ci]];
                for &cj in &combination[a + 1..] {
                    total += matrix.get(free[ci], free[cj]);
                }
            }

            let replace = match &best {
                None => true,
                Some((_, best_total, best_length)) => {
                    self.prefers(total, length, *best_total, *best_length)
                }
            };
            if replace {
                best = Some((combination, total, length));
            }
        }

        let chosen = best.map(|(combination, _, _)| combination).unwrap_or_default();
        forced
            .iter()
            .copied()
            .chain(chosen.into_iter().map(|c| free[c]))
            .collect()
    }

    /// Grow the subset one candidate at a time, always taking the one that
    /// adds the most dissimilarity. With nothing forced, the seed is the
    /// candidate farthest from the rest of `free`.
    fn greedy(
        &self,
        matrix: &DissimilarityMatrix,
        lengths: &[usize],
        forced: &[usize],
        free: &[usize],
        k: usize,
    ) -> Vec<usize> {
        let target = forced.len() + k;
        let mut members = forced.to_vec();
        let mut remaining = free.to_vec();

        while members.len() < target && !remaining.is_empty() {
            let reference: &[usize] = if members.is_empty() { free } else { &members };

            let mut best: Option<(usize, f64, usize)> = None;
            for (position, &candidate) in remaining.iter().enumerate() {
                let score = matrix.contribution(candidate, reference);
                let length = lengths[candidate];
                let replace = match best {
                    None => true,
                    Some((_, best_score, best_length)) => {
                        self.prefers(score, length, best_score, best_length)
                    }
                };
                if replace {
                    best = Some((position, score, length));
                }
            }

            match best {
                Some((position, _, _)) => members.push(remaining.remove(position)),
                None => break,
            }
        }
        members
    }
}

impl SelectionStrategy for MostDifferent {
    fn name(&self) -> &'static str {
        "mostDifferent"
    }

    fn select(&self, pool: &CandidatePool<'_>, n: usize) -> Result<Selection, SelectionError> {
        pool.ensure_not_empty()?;
        if pool.len() <= n {
            return Ok(pool.take_all());
        }

        let matrix = DissimilarityMatrix::for_pool(pool);
        let lengths: Vec<usize> = (0..pool.len()).map(|i| pool.token_len(i)).collect();
        let in_use = pool.in_use();

        let (members, path) = if in_use.len() > n {
            tracing::warn!(
                word = pool.word(),
                in_use = in_use.len(),
                keep = n,
                "more in-use sentences than flashcards per word, keeping the most different"
            );
            // ties among in-use sentences go to input order only
            let by_index = self.clone().with_shorter_sentences(false);
            by_index.search(pool.word(), &matrix, &lengths, &[], &in_use, n)
        } else {
            let free = pool.free();
            self.search(pool.word(), &matrix, &lengths, &in_use, &free, n - in_use.len())
        };

        let score = matrix.total(&members);
        let contributions: Vec<(usize, f64)> = members
            .iter()
            .map(|&i| (i, matrix.contribution(i, &members)))
            .collect();

        Ok(Selection {
            word: pool.word().to_string(),
            picks: pool.ordered_picks(&contributions),
            score,
            path,
        })
    }
}
