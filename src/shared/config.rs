use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};

pub const SERVER_ADDRESS: &str = "127.0.0.1";
pub const SERVER_PORT: u16 = 3000;

pub const DECK_API_BASE_URL: &str = "https://deckofcardsapi.com/api";
pub const DECK_COUNT: u32 = 1;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const COMMAND_CHANNEL_CAPACITY: usize = 32;
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

pub const EXHAUSTED_MESSAGE: &str = "No more cards left in the deck!";

/// Runtime settings, read once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], SERVER_PORT)),
            api_base_url: DECK_API_BASE_URL.to_string(),
            request_timeout: REQUEST_TIMEOUT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `lookup`, falling back to the compiled defaults
    /// for every key it does not know.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let address = lookup("DEALER_ADDRESS").unwrap_or_else(|| SERVER_ADDRESS.to_string());

        let port = match lookup("DEALER_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("invalid DEALER_PORT {raw:?}"))?,
            None => SERVER_PORT,
        };

        let listen_addr: SocketAddr = format!("{address}:{port}")
            .parse()
            .with_context(|| format!("invalid DEALER_ADDRESS {address:?}"))?;

        let api_base_url = lookup("DECK_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DECK_API_BASE_URL.to_string());

        let request_timeout = match lookup("DECK_API_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .with_context(|| format!("invalid DECK_API_TIMEOUT_SECS {raw:?}"))?,
            ),
            None => REQUEST_TIMEOUT,
        };

        Ok(Self { listen_addr, api_base_url, request_timeout })
    }
}
