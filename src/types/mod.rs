pub mod flashcard;
pub mod identifiers;

pub use flashcard::{ClozeFlashcard, FlashcardDeck, GenerationReport};
pub use identifiers::{expression_key, SentenceId, EXPRESSION_SEPARATOR};
