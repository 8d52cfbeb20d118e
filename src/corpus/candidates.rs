use crate::corpus::sentence::Occurrence;

/// One sentence that could illustrate a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Index into the corpus.
    pub sentence: usize,
    pub occurrence: Occurrence,
    /// Chosen by an earlier run and still wanted.
    pub in_use: bool,
}

/// Candidates for a single word, in corpus order, one per sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    word: String,
    candidates: Vec<Candidate>,
}

impl CandidateSet {
    pub fn new(word: impl Into<String>, candidates: Vec<Candidate>) -> Self {
        Self {
            word: word.into(),
            candidates,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn in_use_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.in_use).count()
    }
}
