//! Deterministic sentence selection for cloze flashcards.
//!
//! `cloze-core` indexes a corpus of example sentences and, for every word,
//! picks the `n` sentences that differ most from each other (cosine
//! dissimilarity over word-frequency vectors). Sentences the learner already
//! uses are preserved across runs. All operations are deterministic:
//! identical inputs always produce identical outputs, byte-for-byte.

pub mod config;
pub mod corpus;
pub mod flashcard;
pub mod generator;
pub mod selection;
pub mod types;

pub use config::{ConfigError, GeneratorConfig, PreviousOutput};
pub use corpus::{Corpus, ValidationError};
pub use generator::{FlashcardGenerator, GenerateError};
pub use selection::{AlgorithmKind, Selection, SelectionConfig, SelectionError, SelectionStrategy};
pub use types::{ClozeFlashcard, FlashcardDeck, GenerationReport};
