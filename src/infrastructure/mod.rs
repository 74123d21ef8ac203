pub mod deck_api;

#[cfg(test)]
pub mod scripted;

pub use deck_api::{DeckApi, HttpDeckApi};
