pub mod assembler;
pub mod deck;
pub mod ordering;

pub use assembler::{assemble, assemble_selection};
pub use deck::{carry_in_use, deck_to_json, read_deck, write_deck, DeckError, InUseCarry};
pub use ordering::{apply_output_order, OutputOrder};
