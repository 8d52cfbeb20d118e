use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::FlashcardDeck;

/// Sort key for the words of an output deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputOrder {
    Alphabetical,
    /// Words with more candidate sentences first.
    Frequency,
    /// Words with fewer in-use flashcards first.
    LeastUsedFirst,
}

/// Order `deck` by `orders`, most significant key first.
///
/// The deck starts alphabetical; each key is then applied as a stable sort,
/// least significant first, so earlier keys dominate and alphabetical order
/// settles any remaining tie.
pub fn apply_output_order(
    deck: &mut FlashcardDeck,
    orders: &[OutputOrder],
    frequencies: &BTreeMap<String, usize>,
) {
    deck.sort_words_by(|wa, _, wb, _| wa.cmp(wb));

    for order in orders.iter().rev() {
        match order {
            OutputOrder::Alphabetical => deck.sort_words_by(|wa, _, wb, _| wa.cmp(wb)),
            OutputOrder::Frequency => deck.sort_words_by(|wa, _, wb, _| {
                let fa = frequencies.get(wa).copied().unwrap_or(0);
                let fb = frequencies.get(wb).copied().unwrap_or(0);
                Reverse(fa).cmp(&Reverse(fb))
            }),
            OutputOrder::LeastUsedFirst => deck.sort_words_by(|_, ca, _, cb| {
                let ua = ca.iter().filter(|c| c.in_use).count();
                let ub = cb.iter().filter(|c| c.in_use).count();
                ua.cmp(&ub)
            }),
        }
    }
}
