use cloze_core::corpus::Corpus;
use cloze_core::flashcard::{assemble, deck_to_json};
use cloze_core::types::{ClozeFlashcard, FlashcardDeck};
use serde_json::Value;

fn card(before: &str, word: &str, after: &str, in_use: bool) -> ClozeFlashcard {
    ClozeFlashcard {
        before_cloze: before.to_string(),
        mid_cloze: None,
        after_cloze: after.to_string(),
        cloze_word_part1: word.to_string(),
        cloze_word_part2: None,
        in_use,
    }
}

#[test]
fn golden_single_word_flashcard() {
    let card = card("ona ", "idzie", " do domu", false);

    let json = serde_json::to_string(&card).unwrap();

    // Field order is part of the file format
    let expected = r#"{"beforeCloze":"ona ","afterCloze":" do domu","clozeWordPart1":"idzie","inUse":false}"#;
    assert_eq!(json, expected);
}

#[test]
fn golden_expression_flashcard() {
    let corpus = Corpus::index(&["she looked_1 the word up_1."]).unwrap();
    let (sentence, occurrence) = corpus.occurrences("looked~up")[0];

    let card = assemble(corpus.sentence(sentence), occurrence, true);
    let actual: Value = serde_json::to_value(&card).unwrap();

    let expected: Value = serde_json::from_str(
        r#"{
            "beforeCloze": "she ",
            "midCloze": " the word ",
            "afterCloze": ".",
            "clozeWordPart1": "looked",
            "clozeWordPart2": "up",
            "inUse": true
        }"#,
    )
    .unwrap();

    assert_eq!(actual, expected);
    assert!(card.is_expression());
    assert_eq!(card.sentence_text(), "she looked the word up.");
}

#[test]
fn punctuation_stays_outside_the_cloze() {
    let corpus = Corpus::index(&["\"Ona idzie, do domu.\""]).unwrap();
    let (sentence, occurrence) = corpus.occurrences("idzie")[0];

    let card = assemble(corpus.sentence(sentence), occurrence, false);

    assert_eq!(card.before_cloze, "\"Ona ");
    assert_eq!(card.cloze_word_part1, "idzie");
    assert_eq!(card.after_cloze, ", do domu.\"");
    assert_eq!(card.sentence_text(), corpus.sentence(sentence).text());
}

#[test]
fn legacy_in_use_strings_are_accepted() {
    let legacy = r#"{"beforeCloze":"","afterCloze":"","clozeWordPart1":"x","inUse":"True"}"#;
    let card: ClozeFlashcard = serde_json::from_str(legacy).unwrap();
    assert!(card.in_use);

    let legacy = r#"{"beforeCloze":"","afterCloze":"","clozeWordPart1":"x","inUse":"False"}"#;
    let card: ClozeFlashcard = serde_json::from_str(legacy).unwrap();
    assert!(!card.in_use);

    let missing = r#"{"beforeCloze":"","afterCloze":"","clozeWordPart1":"x"}"#;
    let card: ClozeFlashcard = serde_json::from_str(missing).unwrap();
    assert!(!card.in_use);

    let bad = r#"{"beforeCloze":"","afterCloze":"","clozeWordPart1":"x","inUse":"maybe"}"#;
    assert!(serde_json::from_str::<ClozeFlashcard>(bad).is_err());
}

#[test]
fn golden_deck_file_layout() {
    let mut deck = FlashcardDeck::new();
    deck.insert("a", vec![card("", "a", "", true)]);

    let bytes = deck_to_json(&deck).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    let expected = r#"{
    "a": [
        {
            "beforeCloze": "",
            "afterCloze": "",
            "clozeWordPart1": "a",
            "inUse": true
        }
    ]
}
"#;
    assert_eq!(text, expected);
}

#[test]
fn deck_serialization_keeps_insertion_order() {
    let mut deck = FlashcardDeck::new();
    deck.insert("zebra", vec![card("", "zebra", "", false)]);
    deck.insert("apple", vec![card("", "apple", "", false)]);

    let text = String::from_utf8(deck_to_json(&deck).unwrap()).unwrap();
    let zebra = text.find("\"zebra\"").unwrap();
    let apple = text.find("\"apple\"").unwrap();
    assert!(zebra < apple);

    // Reading back is alphabetical
    let read: FlashcardDeck = serde_json::from_str(&text).unwrap();
    let words: Vec<&str> = read.words().collect();
    assert_eq!(words, vec!["apple", "zebra"]);
    assert_eq!(read.flashcard_count(), 2);
}
