use cloze_core::corpus::{Corpus, InvalidLine, LineIssue, Occurrence, Sentence, ValidationError};
use cloze_core::generator::FlashcardGenerator;
use cloze_core::types::{ClozeFlashcard, FlashcardDeck};
use cloze_core::GeneratorConfig;

#[test]
fn sentence_parsing_keeps_display_text_and_counts_words() {
    let sentence = Sentence::parse(1, "Ona idzie , do domu.").unwrap();

    assert_eq!(sentence.text(), "Ona idzie , do domu.");
    assert_eq!(sentence.tokens().len(), 5);
    // stand-alone comma is not a word
    assert_eq!(sentence.token_len(), 4);

    let last = &sentence.tokens()[4];
    assert_eq!(last.text(), "domu.");
    assert_eq!(last.core(), "domu");
    assert_eq!(last.key(), "domu");

    let keys: Vec<String> = sentence.occurrences().into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["ona", "idzie", "do", "domu"]);
}

#[test]
fn multi_word_expression_is_keyed_by_sorted_parts() {
    let sentence = Sentence::parse(1, "she looked_1 the word up_1.").unwrap();

    assert_eq!(sentence.text(), "she looked the word up.");
    assert_eq!(sentence.tokens()[1].marker(), Some(1));
    assert_eq!(sentence.tokens()[4].marker(), Some(1));

    let occurrences = sentence.occurrences();
    assert_eq!(
        occurrences,
        vec![
            ("she".to_string(), Occurrence::single(0)),
            ("looked~up".to_string(), Occurrence::pair(1, 4)),
            ("the".to_string(), Occurrence::single(2)),
            ("word".to_string(), Occurrence::single(3)),
        ]
    );

    let corpus = Corpus::index(&["she looked_1 the word up_1."]).unwrap();
    assert_eq!(corpus.occurrences("looked~up").len(), 1);
    assert!(corpus.occurrences("looked").is_empty());
}

#[test]
fn validation_collects_every_invalid_line() {
    let lines = [
        "ok line",
        "bad  spaces",
        "no@pe",
        "123",
        "look_1 alone",
        "   ",
        "word_x here",
    ];

    let err = Corpus::index(&lines).unwrap_err();
    let ValidationError::InvalidLines(invalid) = err else {
        panic!("expected InvalidLines");
    };

    let summary: Vec<(usize, LineIssue)> = invalid
        .iter()
        .map(|InvalidLine { line_number, issue, .. }| (*line_number, issue.clone()))
        .collect();

    assert_eq!(
        summary,
        vec![
            (2, LineIssue::RepeatedSpaces),
            (3, LineIssue::DisallowedCharacter('@')),
            (4, LineIssue::NoLetters),
            (5, LineIssue::UnmatchedMarker { marker: 1, count: 1 }),
            (7, LineIssue::MalformedMarker("word_x".to_string())),
        ]
    );
}

#[test]
fn marker_needs_exactly_one_partner() {
    let err = Sentence::parse(1, "a_1 b_1 c_1").unwrap_err();
    assert_eq!(err, LineIssue::UnmatchedMarker { marker: 1, count: 3 });

    let err = Sentence::parse(1, "a _1 b").unwrap_err();
    assert_eq!(err, LineIssue::MalformedMarker("_1".to_string()));

    assert!(Sentence::parse(1, "a_1 b_1 c_2 d_2").is_ok());
}

#[test]
fn empty_corpus_is_rejected() {
    let err = Corpus::index(&["", "   "]).unwrap_err();
    assert_eq!(err, ValidationError::EmptyCorpus);

    let none: [&str; 0] = [];
    assert_eq!(Corpus::index(&none).unwrap_err(), ValidationError::EmptyCorpus);
}

#[test]
fn duplicate_lines_are_indexed_once() {
    let corpus = Corpus::index(&["a b", "a b", "c d"]).unwrap();

    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus.sentence(1).text(), "c d");
    assert_eq!(corpus.sentence(1).line_number(), 3);
    assert_eq!(corpus.find_sentence("c d"), Some(1));
}

#[test]
fn duplicate_line_without_markers_keeps_its_words() {
    let lines = ["she looked_1 it up_1", "she looked it up"];
    let corpus = Corpus::index(&lines).unwrap();

    // 1. Still one sentence, so no id is repeated
    assert_eq!(corpus.len(), 1);

    // 2. Both readings of the line are indexed
    assert_eq!(corpus.occurrences("looked~up"), &[(0, Occurrence::pair(1, 3))]);
    assert_eq!(corpus.occurrences("looked"), &[(0, Occurrence::single(1))]);
    assert_eq!(corpus.occurrences("up"), &[(0, Occurrence::single(3))]);
    let words: Vec<&str> = corpus.words().collect();
    assert_eq!(words, vec!["it", "looked", "looked~up", "she", "up"]);

    // 3. The vector describes the first line only
    assert_eq!(corpus.vocabulary().dimension(), 3);

    // 4. Every word gets a flashcard
    let generator = FlashcardGenerator::new(GeneratorConfig::default()).unwrap();
    let (deck, _) = generator.generate(&lines, &FlashcardDeck::new()).unwrap();
    assert_eq!(deck.len(), 5);
    assert_eq!(
        deck.get("looked").unwrap(),
        &[ClozeFlashcard {
            before_cloze: "she ".to_string(),
            mid_cloze: None,
            after_cloze: " it up".to_string(),
            cloze_word_part1: "looked".to_string(),
            cloze_word_part2: None,
            in_use: false,
        }]
    );
    assert_eq!(deck.get("up").unwrap()[0].before_cloze, "she looked it ");
}

#[test]
fn one_candidate_per_sentence_first_occurrence() {
    let corpus = Corpus::index(&["do do domu", "idzie do"]).unwrap();

    let occurrences = corpus.occurrences("do");
    assert_eq!(occurrences.len(), 2);
    assert_eq!(occurrences[0], (0, Occurrence::single(0)));
    assert_eq!(occurrences[1], (1, Occurrence::single(1)));
}

#[test]
fn vectors_share_vocabulary_and_count_frequencies() {
    let corpus = Corpus::index(&["do do domu", "on idzie"]).unwrap();

    let vocabulary = corpus.vocabulary();
    assert_eq!(vocabulary.dimension(), 4);
    for i in 0..corpus.len() {
        assert_eq!(corpus.vector(i).dimension(), vocabulary.dimension());
    }

    let do_dim = vocabulary.get("do").unwrap();
    let domu_dim = vocabulary.get("domu").unwrap();
    assert_eq!(corpus.vector(0).get(do_dim), 2.0);
    assert_eq!(corpus.vector(0).get(domu_dim), 1.0);
    assert_eq!(corpus.vector(1).get(do_dim), 0.0);
}

#[test]
fn sentence_ids_are_content_hashes() {
    let a = Sentence::parse(1, "ona idzie").unwrap();
    let b = Sentence::parse(9, "ona idzie").unwrap();
    let c = Sentence::parse(1, "on idzie").unwrap();

    assert_eq!(a.id(), b.id());
    assert_ne!(a.id(), c.id());
    assert!(a.id().as_str().starts_with("sha256:"));
}
