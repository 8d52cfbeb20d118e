use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::corpus::candidates::{Candidate, CandidateSet};
use crate::corpus::sentence::{Occurrence, Sentence};
use crate::corpus::validation::{parse_lines, ValidationError};
use crate::corpus::vector::WordVector;

/// Sorted word keys of one run, each mapped to a vector dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    dimensions: BTreeMap<String, usize>,
}

impl Vocabulary {
    fn from_keys(keys: BTreeSet<String>) -> Self {
        let dimensions = keys
            .into_iter()
            .enumerate()
            .map(|(dim, key)| (key, dim))
            .collect();
        Self { dimensions }
    }

    pub fn dimension(&self) -> usize {
        self.dimensions.len()
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.dimensions.get(key).copied()
    }
}

/// An indexed corpus snapshot.
///
/// Built once per run and read-only afterwards: sentences, their vectors, and
/// for every word the sentences it appears in.
#[derive(Debug, Clone)]
pub struct Corpus {
    sentences: Vec<Sentence>,
    vocabulary: Vocabulary,
    vectors: Vec<WordVector>,
    occurrences: BTreeMap<String, Vec<(usize, Occurrence)>>,
    by_text: HashMap<String, usize>,
}

impl Corpus {
    /// Validate, parse and index raw lines.
    pub fn index<S: AsRef<str>>(lines: &[S]) -> Result<Self, ValidationError> {
        let sentences = parse_lines(lines)?;
        Self::from_sentences(sentences)
    }

    /// Index already parsed sentences. Lines that display identically are
    /// kept once; the first wins, and words only the later lines expose
    /// (e.g. `looked` in `she looked it up` after `she looked_1 it up_1`)
    /// are added to it.
    pub fn from_sentences(parsed: Vec<Sentence>) -> Result<Self, ValidationError> {
        if parsed.is_empty() {
            return Err(ValidationError::EmptyCorpus);
        }

        let mut sentences: Vec<Sentence> = Vec::with_capacity(parsed.len());
        let mut own: Vec<Vec<(String, Occurrence)>> = Vec::with_capacity(parsed.len());
        let mut merged: Vec<Vec<(String, Occurrence)>> = Vec::with_capacity(parsed.len());
        let mut by_text: HashMap<String, usize> = HashMap::with_capacity(parsed.len());

        for mut sentence in parsed {
            if let Some(&survivor) = by_text.get(sentence.text()) {
                // same display text, so token positions line up
                let found = &mut merged[survivor];
                let mut added = 0;
                for (key, occurrence) in sentence.occurrences() {
                    if !found.iter().any(|(k, _)| *k == key) {
                        found.push((key, occurrence));
                        added += 1;
                    }
                }
                found.sort_by_key(|(_, occurrence)| occurrence.first);
                tracing::debug!(
                    line = sentence.line_number(),
                    text = sentence.text(),
                    added,
                    "folding duplicate sentence"
                );
                continue;
            }
            sentence.index = sentences.len();
            by_text.insert(sentence.text().to_string(), sentence.index);
            let found = sentence.occurrences();
            merged.push(found.clone());
            own.push(found);
            sentences.push(sentence);
        }

        let keys: BTreeSet<String> = own
            .iter()
            .flat_map(|found| found.iter().map(|(key, _)| key.clone()))
            .collect();
        let vocabulary = Vocabulary::from_keys(keys);

        // Vectors describe the surviving line only
        let vectors: Vec<WordVector> = own
            .iter()
            .map(|found| {
                let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
                for (key, _) in found {
                    if let Some(dim) = vocabulary.get(key) {
                        *counts.entry(dim).or_insert(0) += 1;
                    }
                }
                WordVector::from_counts(vocabulary.dimension(), &counts)
            })
            .collect();

        let mut occurrences: BTreeMap<String, Vec<(usize, Occurrence)>> = BTreeMap::new();
        for (index, found) in merged.into_iter().enumerate() {
            for (key, occurrence) in found {
                let entries = occurrences.entry(key).or_default();
                // one candidate per sentence: the first occurrence
                if entries.last().map(|(s, _)| *s) != Some(index) {
                    entries.push((index, occurrence));
                }
            }
        }

        tracing::debug!(
            sentences = sentences.len(),
            vocabulary = vocabulary.dimension(),
            "indexed corpus"
        );

        Ok(Self {
            sentences,
            vocabulary,
            vectors,
            occurrences,
            by_text,
        })
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn sentence(&self, index: usize) -> &Sentence {
        &self.sentences[index]
    }

    pub fn vector(&self, index: usize) -> &WordVector {
        &self.vectors[index]
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Every word and expression key, alphabetically.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.occurrences.keys().map(String::as_str)
    }

    pub fn occurrences(&self, word: &str) -> &[(usize, Occurrence)] {
        self.occurrences
            .get(word)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sentence index by display text.
    pub fn find_sentence(&self, text: &str) -> Option<usize> {
        self.by_text.get(text).copied()
    }

    /// Candidates for `word`, flagging the sentences in `in_use`.
    pub fn candidate_set(&self, word: &str, in_use: Option<&BTreeSet<usize>>) -> CandidateSet {
        let candidates = self
            .occurrences(word)
            .iter()
            .map(|&(sentence, occurrence)| Candidate {
                sentence,
                occurrence,
                in_use: in_use.is_some_and(|marked| marked.contains(&sentence)),
            })
            .collect();
        CandidateSet::new(word, candidates)
    }
}
