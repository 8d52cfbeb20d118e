use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A fill-in-the-blank card: one sentence with one word or expression hidden.
///
/// Concatenating the fields in declaration order reproduces the sentence's
/// display text, see [`ClozeFlashcard::sentence_text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClozeFlashcard {
    pub before_cloze: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid_cloze: Option<String>,
    pub after_cloze: String,
    pub cloze_word_part1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloze_word_part2: Option<String>,
    #[serde(default, deserialize_with = "deserialize_in_use")]
    pub in_use: bool,
}

impl ClozeFlashcard {
    /// The sentence this card was cut from.
    pub fn sentence_text(&self) -> String {
        let mut text = String::with_capacity(
            self.before_cloze.len() + self.cloze_word_part1.len() + self.after_cloze.len() + 16,
        );
        text.push_str(&self.before_cloze);
        text.push_str(&self.cloze_word_part1);
        if let Some(mid) = &self.mid_cloze {
            text.push_str(mid);
        }
        if let Some(part2) = &self.cloze_word_part2 {
            text.push_str(part2);
        }
        text.push_str(&self.after_cloze);
        text
    }

    /// Whether both cards hide the same span of the same text. `inUse` is
    /// ignored and an empty `midCloze`/`clozeWordPart2`, as older outputs
    /// wrote for single words, equals a missing one.
    pub fn same_cut(&self, other: &ClozeFlashcard) -> bool {
        fn part(value: &Option<String>) -> &str {
            value.as_deref().unwrap_or("")
        }
        self.before_cloze == other.before_cloze
            && self.cloze_word_part1 == other.cloze_word_part1
            && part(&self.mid_cloze) == part(&other.mid_cloze)
            && part(&self.cloze_word_part2) == part(&other.cloze_word_part2)
            && self.after_cloze == other.after_cloze
    }

    pub fn is_expression(&self) -> bool {
        self.cloze_word_part2.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Older outputs wrote `inUse` as the strings `"True"` / `"False"`.
fn deserialize_in_use<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Text(text) => match text.as_str() {
            "True" | "true" => Ok(true),
            "False" | "false" => Ok(false),
            other => Err(D::Error::custom(format!("invalid inUse value: {other:?}"))),
        },
    }
}

/// Word key -> flashcards, in output order.
///
/// Serializes as a JSON object whose keys keep the deck's order. Reading a
/// deck back yields alphabetical order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, Vec<ClozeFlashcard>>")]
pub struct FlashcardDeck {
    entries: Vec<(String, Vec<ClozeFlashcard>)>,
}

impl FlashcardDeck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a word, or replace its cards if it is already present.
    pub fn insert(&mut self, word: impl Into<String>, cards: Vec<ClozeFlashcard>) {
        let word = word.into();
        match self.entries.iter_mut().find(|(w, _)| *w == word) {
            Some((_, existing)) => *existing = cards,
            None => self.entries.push((word, cards)),
        }
    }

    pub fn get(&self, word: &str) -> Option<&[ClozeFlashcard]> {
        self.entries
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, cards)| cards.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ClozeFlashcard])> {
        self.entries
            .iter()
            .map(|(word, cards)| (word.as_str(), cards.as_slice()))
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(word, _)| word.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn flashcard_count(&self) -> usize {
        self.entries.iter().map(|(_, cards)| cards.len()).sum()
    }

    /// Every `inUse` card, grouped under its word.
    pub fn in_use(&self) -> impl Iterator<Item = (&str, &ClozeFlashcard)> {
        self.entries.iter().flat_map(|(word, cards)| {
            cards
                .iter()
                .filter(|card| card.in_use)
                .map(move |card| (word.as_str(), card))
        })
    }

    /// Stable sort of the words. Used by output ordering.
    pub(crate) fn sort_words_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&str, &[ClozeFlashcard], &str, &[ClozeFlashcard]) -> std::cmp::Ordering,
    {
        self.entries
            .sort_by(|(wa, ca), (wb, cb)| compare(wa, ca, wb, cb));
    }
}

impl From<BTreeMap<String, Vec<ClozeFlashcard>>> for FlashcardDeck {
    fn from(map: BTreeMap<String, Vec<ClozeFlashcard>>) -> Self {
        Self {
            entries: map.into_iter().collect(),
        }
    }
}

impl Serialize for FlashcardDeck {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (word, cards) in &self.entries {
            map.serialize_entry(word, cards)?;
        }
        map.end()
    }
}

/// Summary of one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub generated_at: DateTime<Utc>, // informational only
    pub sentences_indexed: usize,
    pub words_considered: usize,
    pub words_written: usize,
    pub flashcards_written: usize,
    pub in_use_preserved: usize,
    pub orphaned_in_use: usize,
    pub approximate_searches: usize,
    pub buried_words: Vec<String>,
    pub skipped_words: Vec<String>,
}
