use std::future::Future;

use anyhow::{bail, Context};
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::domain::{DeckError, DrawnCard, NewDeck, ShuffledDeck};
use crate::models::{DrawResponse, NewDeckResponse, ShuffleResponse};
use crate::shared::{Config, DECK_COUNT};

/// The remote deck service. It owns every deck; callers only mirror what it
/// reports back.
pub trait DeckApi: Send + Sync + 'static {
    /// Creates a new, already shuffled deck.
    fn new_deck(&self) -> impl Future<Output = Result<NewDeck, DeckError>> + Send;

    /// Draws one card from `deck_id`.
    fn draw(&self, deck_id: &str) -> impl Future<Output = Result<DrawnCard, DeckError>> + Send;

    /// Returns every drawn card to `deck_id` and reshuffles it.
    fn shuffle(&self, deck_id: &str) -> impl Future<Output = Result<ShuffledDeck, DeckError>> + Send;
}

impl From<reqwest::Error> for DeckError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DeckError::Protocol(err.to_string())
        } else {
            DeckError::Network(err.to_string())
        }
    }
}

pub struct HttpDeckApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpDeckApi {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("failed to build deck service HTTP client")?;

        let base_url = Url::parse(&config.api_base_url)
            .with_context(|| format!("invalid deck service URL {:?}", config.api_base_url))?;
        if base_url.cannot_be_a_base() {
            bail!("deck service URL {:?} cannot carry a path", config.api_base_url);
        }

        Ok(Self { client, base_url })
    }

    /// Appends `segments` (each percent-encoded, so an id can never add a
    /// segment or a query) plus a trailing slash to the base URL.
    fn endpoint(&self, segments: &[&str], query: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments).push("");
        }
        url.set_query(query);
        url
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, DeckError> {
        tracing::debug!(%url, "deck service request");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DeckError::Network(format!("{url} returned {status}")));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|err| DeckError::Protocol(format!("undecodable reply from {url}: {err}")))
    }
}

impl DeckApi for HttpDeckApi {
    async fn new_deck(&self) -> Result<NewDeck, DeckError> {
        let query = format!("deck_count={DECK_COUNT}");
        let url = self.endpoint(&["deck", "new", "shuffle"], Some(&query));
        let resp: NewDeckResponse = self.get(url).await?;
        NewDeck::try_from(resp)
    }

    async fn draw(&self, deck_id: &str) -> Result<DrawnCard, DeckError> {
        let url = self.endpoint(&["deck", deck_id, "draw"], Some("count=1"));
        let resp: DrawResponse = self.get(url).await?;
        DrawnCard::try_from(resp)
    }

    async fn shuffle(&self, deck_id: &str) -> Result<ShuffledDeck, DeckError> {
        let url = self.endpoint(&["deck", deck_id, "shuffle"], None);
        let resp: ShuffleResponse = self.get(url).await?;
        ShuffledDeck::try_from(resp)
    }
}
