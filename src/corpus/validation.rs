use thiserror::Error;

use crate::corpus::sentence::{Sentence, MARKER, PUNCTUATION};

/// Why a single line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineIssue {
    #[error("line contains no letters")]
    NoLetters,
    #[error("line contains repeated spaces")]
    RepeatedSpaces,
    #[error("disallowed character {0:?}")]
    DisallowedCharacter(char),
    #[error("malformed multi-word marker in {0:?}")]
    MalformedMarker(String),
    #[error("multi-word marker _{marker} appears {count} time(s), expected 2")]
    UnmatchedMarker { marker: u32, count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLine {
    pub line_number: usize,
    pub line: String,
    pub issue: LineIssue,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("corpus contains no sentences")]
    EmptyCorpus,

    #[error("{}", describe_invalid(.0))]
    InvalidLines(Vec<InvalidLine>),
}

fn describe_invalid(lines: &[InvalidLine]) -> String {
    match lines.first() {
        Some(first) => format!(
            "{} invalid line(s); line {} {:?}: {}",
            lines.len(),
            first.line_number,
            first.line,
            first.issue
        ),
        None => "invalid lines".to_string(),
    }
}

/// Character-level checks. Marker pairing is checked by [`Sentence::parse`].
pub fn check_line(line: &str) -> Result<(), LineIssue> {
    if !line.chars().any(char::is_alphabetic) {
        return Err(LineIssue::NoLetters);
    }
    if line.contains("  ") {
        return Err(LineIssue::RepeatedSpaces);
    }
    let disallowed = line.chars().find(|&c| {
        !(c.is_alphanumeric() || c == ' ' || c == MARKER || PUNCTUATION.contains(&c))
    });
    match disallowed {
        Some(c) => Err(LineIssue::DisallowedCharacter(c)),
        None => Ok(()),
    }
}

/// Validate and parse every line. Blank lines are skipped.
///
/// All bad lines are reported together; nothing is returned unless the whole
/// corpus is valid.
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Sentence>, ValidationError> {
    let mut sentences = Vec::with_capacity(lines.len());
    let mut invalid = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        let line_number = i + 1;

        match check_line(line).and_then(|()| Sentence::parse(line_number, line)) {
            Ok(sentence) => sentences.push(sentence),
            Err(issue) => invalid.push(InvalidLine {
                line_number,
                line: line.to_string(),
                issue,
            }),
        }
    }

    if !invalid.is_empty() {
        return Err(ValidationError::InvalidLines(invalid));
    }
    if sentences.is_empty() {
        return Err(ValidationError::EmptyCorpus);
    }
    Ok(sentences)
}
