pub mod candidates;
pub mod indexer;
pub mod sentence;
pub mod validation;
pub mod vector;

pub use candidates::{Candidate, CandidateSet};
pub use indexer::{Corpus, Vocabulary};
pub use sentence::{split_punctuation, word_key, Occurrence, Sentence, Token};
pub use validation::{parse_lines, InvalidLine, LineIssue, ValidationError};
pub use vector::WordVector;
