pub mod cards;
pub mod deck;
pub mod error;
pub mod state;

pub use cards::*;
pub use deck::*;
pub use error::*;
pub use state::*;
