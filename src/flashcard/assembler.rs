use crate::corpus::{Corpus, Occurrence, Sentence};
use crate::selection::Selection;
use crate::types::ClozeFlashcard;

/// Cut a sentence around the target word (or both halves of an expression).
///
/// Punctuation attached to the word stays on the surrounding side, so the
/// card's fields concatenate back to the sentence's display text.
pub fn assemble(sentence: &Sentence, occurrence: Occurrence, in_use: bool) -> ClozeFlashcard {
    let text = sentence.text();
    let first = sentence.core_span(occurrence.first);

    match occurrence.second {
        None => ClozeFlashcard {
            before_cloze: text[..first.start].to_string(),
            mid_cloze: None,
            after_cloze: text[first.end..].to_string(),
            cloze_word_part1: text[first].to_string(),
            cloze_word_part2: None,
            in_use,
        },
        Some(second) => {
            let second = sentence.core_span(second);
            ClozeFlashcard {
                before_cloze: text[..first.start].to_string(),
                mid_cloze: Some(text[first.end..second.start].to_string()),
                after_cloze: text[second.end..].to_string(),
                cloze_word_part1: text[first].to_string(),
                cloze_word_part2: Some(text[second].to_string()),
                in_use,
            }
        }
    }
}

/// Flashcards for a word's Selection, in Selection order.
pub fn assemble_selection(corpus: &Corpus, selection: &Selection) -> Vec<ClozeFlashcard> {
    selection
        .picks
        .iter()
        .map(|pick| assemble(corpus.sentence(pick.sentence), pick.occurrence, pick.in_use))
        .collect()
}
