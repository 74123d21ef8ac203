pub mod api;
pub mod web_socket;

pub use api::*;
pub use web_socket::*;
