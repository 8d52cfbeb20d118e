use cloze_core::config::GeneratorConfig;
use cloze_core::flashcard::OutputOrder;
use cloze_core::generator::FlashcardGenerator;
use cloze_core::types::{ClozeFlashcard, FlashcardDeck};

const LINES: [&str; 3] = [
    "ona idzie do domu",
    "on idzie do szkoły",
    "ona śpiewa piękną pieśń",
];

fn words_in_order(order: Vec<OutputOrder>, previous: &FlashcardDeck) -> Vec<String> {
    let mut config = GeneratorConfig::default();
    config.selection.per_word = 2;
    config.output_order = order;
    let generator = FlashcardGenerator::new(config).unwrap();
    let (deck, _) = generator.generate(&LINES, previous).unwrap();
    deck.words().map(str::to_string).collect()
}

#[test]
fn alphabetical_is_the_default() {
    let words = words_in_order(vec![OutputOrder::Alphabetical], &FlashcardDeck::new());
    assert_eq!(
        words,
        vec!["do", "domu", "idzie", "on", "ona", "piękną", "pieśń", "szkoły", "śpiewa"]
    );
}

#[test]
fn frequency_puts_common_words_first() {
    let words = words_in_order(vec![OutputOrder::Frequency], &FlashcardDeck::new());
    assert_eq!(
        words,
        vec!["do", "idzie", "ona", "domu", "on", "piękną", "pieśń", "szkoły", "śpiewa"]
    );
}

#[test]
fn least_used_first_then_frequency() {
    let mut previous = FlashcardDeck::new();
    previous.insert(
        "do",
        vec![ClozeFlashcard {
            before_cloze: "ona idzie ".to_string(),
            mid_cloze: None,
            after_cloze: " domu".to_string(),
            cloze_word_part1: "do".to_string(),
            cloze_word_part2: None,
            in_use: true,
        }],
    );

    let words = words_in_order(
        vec![OutputOrder::LeastUsedFirst, OutputOrder::Frequency],
        &previous,
    );
    assert_eq!(
        words,
        vec!["idzie", "ona", "domu", "on", "piękną", "pieśń", "szkoły", "śpiewa", "do"]
    );
}
