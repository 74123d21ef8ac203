pub mod deck_app;

pub use deck_app::*;
