use std::collections::BTreeMap;
use std::ops::Range;

use crate::corpus::validation::LineIssue;
use crate::types::identifiers::{expression_key, SentenceId};

/// Punctuation that may lead or trail a word.
pub const PUNCTUATION: &[char] = &[',', '.', '?', '"'];

/// Marker between a word and its multi-word expression number, as in `look_1`.
pub const MARKER: char = '_';

/// One whitespace-separated piece of a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Display text with any `_N` marker removed.
    text: String,
    /// Byte offset of `text` inside the sentence's display text.
    offset: usize,
    /// The word itself, without surrounding punctuation. Relative to `text`.
    core: Range<usize>,
    marker: Option<u32>,
}

impl Token {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn core(&self) -> &str {
        &self.text[self.core.clone()]
    }

    pub fn marker(&self) -> Option<u32> {
        self.marker
    }

    /// Stand-alone punctuation such as `,` between spaces is not a word.
    pub fn is_word(&self) -> bool {
        !self.core.is_empty()
    }

    pub fn key(&self) -> String {
        word_key(self.core())
    }
}

/// Where a target word sits inside a sentence.
///
/// `second` is set for multi-word expressions and always follows `first`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Occurrence {
    pub first: usize,
    pub second: Option<usize>,
}

impl Occurrence {
    pub fn single(position: usize) -> Self {
        Self {
            first: position,
            second: None,
        }
    }

    pub fn pair(first: usize, second: usize) -> Self {
        debug_assert!(first < second);
        Self {
            first,
            second: Some(second),
        }
    }
}

/// A validated corpus line.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub(crate) index: usize,
    line_number: usize,
    id: SentenceId,
    raw: String,
    text: String,
    tokens: Vec<Token>,
}

impl Sentence {
    /// Parse one trimmed line. `line_number` is 1-based and only used for
    /// diagnostics.
    pub fn parse(line_number: usize, raw: &str) -> Result<Self, LineIssue> {
        let mut tokens: Vec<Token> = Vec::new();
        let mut text = String::with_capacity(raw.len());

        for piece in raw.split(' ') {
            let (prefix, core, suffix) = split_punctuation(piece);

            let (word, marker) = match core.split_once(MARKER) {
                None => (core, None),
                Some((word, number)) => {
                    let well_formed = !word.is_empty()
                        && !number.is_empty()
                        && number.chars().all(|c| c.is_ascii_digit());
                    let marker = if well_formed { number.parse::<u32>().ok() } else { None };
                    match marker {
                        Some(marker) => (word, Some(marker)),
                        None => return Err(LineIssue::MalformedMarker(piece.to_string())),
                    }
                }
            };

            if !text.is_empty() {
                text.push(' ');
            }
            let offset = text.len();
            text.push_str(prefix);
            text.push_str(word);
            text.push_str(suffix);

            tokens.push(Token {
                text: text[offset..].to_string(),
                offset,
                core: prefix.len()..prefix.len() + word.len(),
                marker,
            });
        }

        let mut marker_counts: BTreeMap<u32, usize> = BTreeMap::new();
        for marker in tokens.iter().filter_map(|t| t.marker) {
            *marker_counts.entry(marker).or_insert(0) += 1;
        }
        if let Some((&marker, &count)) = marker_counts.iter().find(|&(_, &count)| count != 2) {
            return Err(LineIssue::UnmatchedMarker { marker, count });
        }

        Ok(Self {
            index: 0,
            line_number,
            id: SentenceId::from_text(&text),
            raw: raw.to_string(),
            text,
            tokens,
        })
    }

    /// Position in the corpus.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn id(&self) -> &SentenceId {
        &self.id
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Tokens joined by single spaces, markers removed.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of word tokens. Stand-alone punctuation does not count.
    pub fn token_len(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_word()).count()
    }

    /// Byte range of a token's core inside [`Sentence::text`].
    pub fn core_span(&self, position: usize) -> Range<usize> {
        let token = &self.tokens[position];
        token.offset + token.core.start..token.offset + token.core.end
    }

    /// Every word and multi-word expression in the sentence with its key,
    /// ordered by first position.
    pub fn occurrences(&self) -> Vec<(String, Occurrence)> {
        let mut found: Vec<(String, Occurrence)> = Vec::new();
        let mut open: BTreeMap<u32, usize> = BTreeMap::new();

        for (position, token) in self.tokens.iter().enumerate() {
            if !token.is_word() {
                continue;
            }
            match token.marker {
                None => found.push((token.key(), Occurrence::single(position))),
                Some(marker) => match open.remove(&marker) {
                    None => {
                        open.insert(marker, position);
                    }
                    Some(first) => {
                        let first_key = self.tokens[first].key();
                        let key = expression_key(&[&first_key, &token.key()]);
                        found.push((key, Occurrence::pair(first, position)));
                    }
                },
            }
        }

        found.sort_by_key(|(_, occurrence)| occurrence.first);
        found
    }
}

/// Split a piece into leading punctuation, the word, and trailing punctuation.
pub fn split_punctuation(piece: &str) -> (&str, &str, &str) {
    let body = piece.trim_start_matches(PUNCTUATION);
    let prefix = &piece[..piece.len() - body.len()];
    let core = body.trim_end_matches(PUNCTUATION);
    let suffix = &body[core.len()..];
    (prefix, core, suffix)
}

/// Lookup key of a single word: alphanumerics only, lowercased.
pub fn word_key(core: &str) -> String {
    core.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
