//! A [`DeckApi`] whose every request stays open until the test answers it.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::domain::{DeckError, DrawnCard, NewDeck, ShuffledDeck};
use crate::infrastructure::DeckApi;

#[derive(Debug)]
pub enum PendingCall {
    NewDeck { reply: oneshot::Sender<Result<NewDeck, DeckError>> },
    Draw { deck_id: String, reply: oneshot::Sender<Result<DrawnCard, DeckError>> },
    Shuffle { deck_id: String, reply: oneshot::Sender<Result<ShuffledDeck, DeckError>> },
}

pub struct ScriptedDeckApi {
    calls: mpsc::UnboundedSender<PendingCall>,
}

impl ScriptedDeckApi {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<PendingCall>) {
        let (calls, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { calls }), rx)
    }

    async fn wait<T>(
        &self,
        call: impl FnOnce(oneshot::Sender<Result<T, DeckError>>) -> PendingCall,
    ) -> Result<T, DeckError> {
        let (reply, rx) = oneshot::channel();
        if self.calls.send(call(reply)).is_err() {
            return Err(DeckError::Network("script closed".into()));
        }
        rx.await
            .unwrap_or_else(|_| Err(DeckError::Network("request dropped by test".into())))
    }
}

impl DeckApi for ScriptedDeckApi {
    async fn new_deck(&self) -> Result<NewDeck, DeckError> {
        self.wait(|reply| PendingCall::NewDeck { reply }).await
    }

    async fn draw(&self, deck_id: &str) -> Result<DrawnCard, DeckError> {
        let deck_id = deck_id.to_string();
        self.wait(|reply| PendingCall::Draw { deck_id, reply }).await
    }

    async fn shuffle(&self, deck_id: &str) -> Result<ShuffledDeck, DeckError> {
        let deck_id = deck_id.to_string();
        self.wait(|reply| PendingCall::Shuffle { deck_id, reply }).await
    }
}
