use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use thiserror::Error;

use crate::config::{ConfigError, GeneratorConfig};
use crate::corpus::{word_key, CandidateSet, Corpus, ValidationError};
use crate::flashcard::{
    apply_output_order, assemble_selection, carry_in_use, read_deck, write_deck, DeckError,
};
use crate::selection::{select_all, SearchPath};
use crate::types::{
    expression_key, ClozeFlashcard, FlashcardDeck, GenerationReport, EXPRESSION_SEPARATOR,
};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("IO error reading corpus: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corpus validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// Runs one batch: corpus in, flashcard deck out.
///
/// Single-threaded and synchronous apart from the optional per-word fan-out
/// inside selection.
#[derive(Debug, Clone)]
pub struct FlashcardGenerator {
    config: GeneratorConfig,
}

impl FlashcardGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Read the configured corpus and previous deck, generate, and write the
    /// output file.
    pub fn run(&self) -> Result<GenerationReport, GenerateError> {
        let input = &self.config.input_file_path;
        tracing::info!(path = %input.display(), "reading sentences");
        let text = std::fs::read_to_string(input)?;
        let lines: Vec<&str> = text.lines().collect();

        let previous = match self.config.previous_output_path() {
            None => {
                tracing::info!("ignoring previous output, starting fresh");
                FlashcardDeck::new()
            }
            Some(path) => match read_deck(path)? {
                Some(deck) => deck,
                None => {
                    tracing::info!(path = %path.display(), "no previous flashcards found, starting fresh");
                    FlashcardDeck::new()
                }
            },
        };

        let (deck, report) = self.generate(&lines, &previous)?;
        write_deck(&self.config.output_file_path, &deck)?;

        tracing::info!(
            path = %self.config.output_file_path.display(),
            words = report.words_written,
            flashcards = report.flashcards_written,
            "wrote flashcards"
        );
        Ok(report)
    }

    /// The pure part of a run. No files are touched.
    pub fn generate<S: AsRef<str>>(
        &self,
        lines: &[S],
        previous: &FlashcardDeck,
    ) -> Result<(FlashcardDeck, GenerationReport), GenerateError> {
        let config = &self.config.selection;

        // 0. Index; any invalid line aborts before selection
        let corpus = Corpus::index(lines)?;
        let carry = carry_in_use(&corpus, previous);

        // 1. Candidate sets, minus buried words
        let buried: BTreeSet<String> = self
            .config
            .words_to_bury
            .iter()
            .map(|w| {
                let parts: Vec<String> = w.split(EXPRESSION_SEPARATOR).map(word_key).collect();
                expression_key(&parts.iter().map(String::as_str).collect::<Vec<_>>())
            })
            .collect();

        let sets: Vec<CandidateSet> = corpus
            .words()
            .filter(|word| !buried.contains(*word))
            .map(|word| corpus.candidate_set(word, carry.marked.get(word)))
            .collect();
        let frequencies: BTreeMap<String, usize> = corpus
            .words()
            .map(|word| (word.to_string(), corpus.occurrences(word).len()))
            .collect();

        // 2. Selection
        let strategy = config.algorithm.resolve(config, previous);
        let outcome = select_all(
            strategy.as_ref(),
            &corpus,
            &sets,
            config.per_word,
            self.config.parallel,
        );

        let mut skipped_words = Vec::with_capacity(outcome.failures.len());
        for (word, error) in &outcome.failures {
            tracing::error!(word = %word, error = %error, "skipping word");
            skipped_words.push(word.clone());
        }

        // 3. Assembly
        let mut deck = FlashcardDeck::new();
        for (word, selection) in &outcome.selections {
            let mut cards = assemble_selection(&corpus, selection);
            if let Some(orphans) = carry.orphans.get(word) {
                cards.extend(orphans.iter().cloned());
            }
            deck.insert(word.clone(), cards);
        }

        let mut buried_words = Vec::new();
        for word in &buried {
            let kept: Vec<ClozeFlashcard> = previous
                .get(word)
                .unwrap_or(&[])
                .iter()
                .filter(|card| card.in_use)
                .cloned()
                .collect();
            if !kept.is_empty() {
                deck.insert(word.clone(), kept);
            }
            if !corpus.occurrences(word).is_empty() {
                buried_words.push(word.clone());
            }
        }

        // In-use cards of words that vanished from the corpus entirely
        for (word, orphans) in &carry.orphans {
            if deck.get(word).is_none() {
                deck.insert(word.clone(), orphans.clone());
            }
        }

        apply_output_order(&mut deck, &self.config.output_order, &frequencies);

        let report = GenerationReport {
            generated_at: Utc::now(),
            sentences_indexed: corpus.len(),
            words_considered: sets.len(),
            words_written: deck.len(),
            flashcards_written: deck.flashcard_count(),
            in_use_preserved: deck.in_use().count(),
            orphaned_in_use: carry.orphan_count(),
            approximate_searches: outcome
                .selections
                .values()
                .filter(|s| s.path == SearchPath::Approximate)
                .count(),
            buried_words,
            skipped_words,
        };

        tracing::info!(
            sentences = report.sentences_indexed,
            words = report.words_written,
            flashcards = report.flashcards_written,
            skipped = report.skipped_words.len(),
            "generated flashcards"
        );
        Ok((deck, report))
    }
}
