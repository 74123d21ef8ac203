use serde::{Serialize, Deserialize};

/// A card exactly as the deck service describes it. Values are opaque
/// strings ("QUEEN", "HEARTS"); nothing here interprets them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub value: String,
    pub suit: String,
    pub image: String,
}

impl Card {
    pub fn label(&self) -> String {
        format!("{} of {}", self.value, self.suit)
    }
}
