use std::fs;
use std::path::{Path, PathBuf};

use cloze_core::config::{ConfigError, GeneratorConfig, PreviousOutput};
use cloze_core::flashcard::OutputOrder;
use cloze_core::generator::FlashcardGenerator;
use cloze_core::selection::AlgorithmKind;
use tempfile::tempdir;

#[test]
fn empty_object_gives_defaults() {
    let config = GeneratorConfig::from_json_str("{}").unwrap();

    assert_eq!(config, GeneratorConfig::default());
    assert_eq!(config.input_file_path, PathBuf::from("sentences.txt"));
    assert_eq!(config.output_file_path, PathBuf::from("clozeFlashcards.json"));
    assert_eq!(config.selection.per_word, 3);
    assert_eq!(config.selection.algorithm, AlgorithmKind::MostDifferent);
    assert!(!config.selection.benefit_shorter_sentences);
    assert_eq!(config.output_order, vec![OutputOrder::Alphabetical]);
    assert_eq!(config.previous_output, PreviousOutput::SameAsOutput);
    assert!(config.parallel);
}

#[test]
fn camel_case_keys_are_read() {
    let text = r#"{
        "inputFilePath": "in/zdania.txt",
        "outputFilePath": "out/fiszki.json",
        "previousOutput": "ignore",
        "clozeChoosingAlgorithm": "highestProportionOfNewWords",
        "numFlashcardsPerWord": 5,
        "benefitShorterSentences": true,
        "maxCombinations": 5000,
        "outputOrder": ["leastUsedFirst", "frequency"],
        "wordsToBury": ["idzie"],
        "parallel": false
    }"#;

    let config = GeneratorConfig::from_json_str(text).unwrap();

    assert_eq!(config.input_file_path, PathBuf::from("in/zdania.txt"));
    assert_eq!(config.output_file_path, PathBuf::from("out/fiszki.json"));
    assert_eq!(config.previous_output, PreviousOutput::Ignore);
    assert_eq!(config.selection.algorithm, AlgorithmKind::HighestProportionOfNewWords);
    assert_eq!(config.selection.per_word, 5);
    assert!(config.selection.benefit_shorter_sentences);
    assert_eq!(config.selection.max_combinations, 5000);
    assert_eq!(
        config.output_order,
        vec![OutputOrder::LeastUsedFirst, OutputOrder::Frequency]
    );
    assert_eq!(config.words_to_bury, vec!["idzie".to_string()]);
    assert!(!config.parallel);
    assert_eq!(config.previous_output_path(), None);
}

#[test]
fn previous_output_variants() {
    let config = GeneratorConfig::default();
    assert_eq!(
        config.previous_output_path(),
        Some(Path::new("clozeFlashcards.json"))
    );

    let config = GeneratorConfig::from_json_str(r#"{"previousOutput": {"file": "old.json"}}"#).unwrap();
    assert_eq!(config.previous_output, PreviousOutput::File(PathBuf::from("old.json")));
    assert_eq!(config.previous_output_path(), Some(Path::new("old.json")));
}

#[test]
fn zero_flashcards_per_word_is_rejected() {
    let err = GeneratorConfig::from_json_str(r#"{"numFlashcardsPerWord": 0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidFlashcardCount(0)));

    let mut config = GeneratorConfig::default();
    config.selection.per_word = 0;
    assert!(FlashcardGenerator::new(config).is_err());

    let err = GeneratorConfig::from_json_str(r#"{"maxCombinations": 0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidCombinationCap));
}

#[test]
fn unknown_values_are_parse_errors() {
    let err = GeneratorConfig::from_json_str(r#"{"clozeChoosingAlgorithm": "random"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));

    let err = GeneratorConfig::from_json_str(r#"{"outputOrder": ["random"]}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"numFlashcardsPerWord": 2}"#).unwrap();

    let config = GeneratorConfig::load(&path).unwrap();
    assert_eq!(config.selection.per_word, 2);

    let missing = GeneratorConfig::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(missing, ConfigError::Io { .. }));
}

#[test]
fn config_round_trips_through_json() {
    let mut config = GeneratorConfig::default();
    config.words_to_bury = vec!["looked~up".to_string()];
    config.previous_output = PreviousOutput::File(PathBuf::from("prev.json"));

    let text = serde_json::to_string(&config).unwrap();
    assert!(text.contains("\"numFlashcardsPerWord\":3"));
    assert!(text.contains("\"clozeChoosingAlgorithm\":\"mostDifferent\""));

    let back = GeneratorConfig::from_json_str(&text).unwrap();
    assert_eq!(back, config);
}
