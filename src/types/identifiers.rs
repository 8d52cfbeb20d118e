use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Content hash of a sentence's display text.
///
/// Two lines that display identically share an id, which is how the indexer
/// folds duplicate lines and how a Selection proves it holds no repeats.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentenceId(String);

impl SentenceId {
    pub fn from_text(text: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        SentenceId(format!("sha256:{hex}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Separator between the parts of a multi-word expression key.
pub const EXPRESSION_SEPARATOR: char = '~';

/// Build the key of a multi-word expression from its parts' keys.
/// Parts are sorted so `look_1 ... up_1` and `up_1 ... look_1` share a key.
pub fn expression_key(parts: &[&str]) -> String {
    let mut sorted: Vec<&str> = parts.to_vec();
    sorted.sort_unstable();
    sorted.join(&EXPRESSION_SEPARATOR.to_string())
}
