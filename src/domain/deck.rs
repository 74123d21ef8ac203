use serde::Serialize;

use crate::domain::Card;

/// Result of creating a fresh shuffled deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeck {
    pub deck_id: String,
    pub remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnCard {
    pub card: Card,
    pub remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffledDeck {
    pub remaining: u32,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Operation {
    Initialize,
    Draw,
    Shuffle,
}
