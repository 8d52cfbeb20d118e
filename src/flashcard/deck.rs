use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::corpus::Corpus;
use crate::flashcard::assembler::assemble;
use crate::types::{ClozeFlashcard, FlashcardDeck};

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Previous output {path} is not a valid flashcard file: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// In-use state recovered from a previous deck.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InUseCarry {
    /// Word -> corpus indices of sentences that must stay selected.
    pub marked: BTreeMap<String, BTreeSet<usize>>,
    /// In-use cards whose sentence is gone from the corpus, kept verbatim.
    pub orphans: BTreeMap<String, Vec<ClozeFlashcard>>,
}

impl InUseCarry {
    pub fn marked_count(&self) -> usize {
        self.marked.values().map(BTreeSet::len).sum()
    }

    pub fn orphan_count(&self) -> usize {
        self.orphans.values().map(Vec::len).sum()
    }
}

/// Match every in-use card of `previous` to a sentence of `corpus`.
///
/// A card matches when its reassembled text equals a sentence that still
/// contains the card's word, cut at the same position. A card that hid a
/// later repeat of the word cannot be rebuilt and is kept verbatim.
pub fn carry_in_use(corpus: &Corpus, previous: &FlashcardDeck) -> InUseCarry {
    let mut carry = InUseCarry::default();

    for (word, card) in previous.in_use() {
        let text = card.sentence_text();
        let matched = corpus.find_sentence(&text).filter(|&index| {
            corpus
                .occurrences(word)
                .iter()
                .filter(|&&(sentence, _)| sentence == index)
                .any(|&(sentence, occurrence)| {
                    assemble(corpus.sentence(sentence), occurrence, true).same_cut(card)
                })
        });

        match matched {
            Some(index) => {
                carry.marked.entry(word.to_string()).or_default().insert(index);
            }
            None => {
                tracing::warn!(word, sentence = %text, "in-use flashcard no longer matches the corpus, keeping it as is");
                carry
                    .orphans
                    .entry(word.to_string())
                    .or_default()
                    .push(card.clone());
            }
        }
    }

    carry
}

/// Read a deck. A missing file is `Ok(None)`.
pub fn read_deck(path: &Path) -> Result<Option<FlashcardDeck>, DeckError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let deck = serde_json::from_slice(&bytes).map_err(|source| DeckError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(deck))
}

/// Pretty JSON with four-space indentation and a trailing newline.
pub fn deck_to_json(deck: &FlashcardDeck) -> Result<Vec<u8>, DeckError> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    deck.serialize(&mut serializer)?;
    out.push(b'\n');
    Ok(out)
}

/// Write a deck atomically: temp file next to `path`, synced, then renamed.
pub fn write_deck(path: &Path, deck: &FlashcardDeck) -> Result<(), DeckError> {
    let bytes = deck_to_json(deck)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut temp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    {
        let file = fs::File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&bytes)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)?;
    Ok(())
}
