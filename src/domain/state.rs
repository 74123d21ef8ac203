use serde::Serialize;

use crate::domain::{Card, DrawnCard, NewDeck, ShuffledDeck};

pub const SHUFFLE_LABEL: &str = "Shuffle Deck";
pub const SHUFFLING_LABEL: &str = "Shuffling...";

/// Local mirror of the server-side deck. `remaining` and `drawn` only ever
/// change by applying a response; nothing is decremented locally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckState {
    pub deck_id: Option<String>,
    pub remaining: Option<u32>,
    /// Cards drawn since the last shuffle, in response-arrival order.
    pub drawn: Vec<Card>,
    pub is_shuffling: bool,
}

impl DeckState {
    pub fn apply_new_deck(&mut self, deck: NewDeck) {
        self.deck_id = Some(deck.deck_id);
        self.remaining = Some(deck.remaining);
    }

    /// Returns true when the response says the deck is now empty.
    pub fn apply_draw(&mut self, drawn: DrawnCard) -> bool {
        self.drawn.push(drawn.card);
        self.remaining = Some(drawn.remaining);
        drawn.remaining == 0
    }

    pub fn begin_shuffle(&mut self) {
        self.is_shuffling = true;
    }

    pub fn apply_shuffle(&mut self, shuffled: ShuffledDeck) {
        self.drawn.clear();
        self.remaining = Some(shuffled.remaining);
        self.is_shuffling = false;
    }

    /// Closes the shuffle bracket without touching the deck, for failed requests.
    pub fn end_shuffle(&mut self) {
        self.is_shuffling = false;
    }

    pub fn latest_card(&self) -> Option<&Card> {
        self.drawn.last()
    }

    pub fn draw_disabled(&self) -> bool {
        self.deck_id.is_none() || self.is_shuffling || self.remaining == Some(0)
    }

    pub fn shuffle_disabled(&self) -> bool {
        self.deck_id.is_none() || self.is_shuffling
    }

    pub fn shuffle_label(&self) -> &'static str {
        if self.is_shuffling { SHUFFLING_LABEL } else { SHUFFLE_LABEL }
    }

    pub fn view(&self) -> DeckView {
        DeckView {
            latest_card: self.latest_card().cloned(),
            remaining: self.remaining,
            draw_disabled: self.draw_disabled(),
            shuffle_disabled: self.shuffle_disabled(),
            is_shuffling: self.is_shuffling,
            shuffle_label: self.shuffle_label().to_string(),
        }
    }
}

/// Everything the page needs to render, derived from a [`DeckState`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeckView {
    pub latest_card: Option<Card>,
    pub remaining: Option<u32>,
    pub draw_disabled: bool,
    pub shuffle_disabled: bool,
    pub is_shuffling: bool,
    pub shuffle_label: String,
}
