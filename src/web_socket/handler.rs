use std::sync::Arc;

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::IntoResponse,
};
use tokio::sync::{broadcast, mpsc, oneshot};
use uuid::Uuid;

use crate::dealer::{DeckApp, DeckCommand, DeckEvent};
use crate::infrastructure::DeckApi;
use crate::models::{ClientAction, ClientEvent, ServerMessage};
use crate::shared::EXHAUSTED_MESSAGE;
use crate::view;

pub async fn ws_handler<A: DeckApi>(ws: WebSocketUpgrade, api: Arc<A>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, api))
}

/// One connection is one mount of the app: it starts on upgrade and is torn
/// down when the socket goes away.
async fn handle_socket<A: DeckApi>(mut socket: WebSocket, api: Arc<A>) {
    let session = Uuid::new_v4();
    let (deck_tx, broadcaster) = DeckApp::start(api);

    // subscribe before mounting so the first render is not missed
    let mut events = broadcaster.subscribe();
    if deck_tx.send(DeckCommand::Mount).await.is_err() {
        return;
    }

    tracing::info!(%session, "[WS] connected");

    // notices forwarded to this socket, compared against the actor's count on resync
    let mut delivered = 0u64;

    loop {
        tokio::select! {
            ev = events.recv() => {
                match ev {
                    Ok(event) => {
                        if event.is_notice() {
                            delivered += 1;
                        }
                        if send(&mut socket, &to_message(event)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(%session, skipped, "[WS] lagged on events, resyncing");
                        // drop the stale backlog; the snapshot supersedes it
                        events = events.resubscribe();
                        if resync(&mut socket, &deck_tx, &mut delivered).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let Ok(client) = serde_json::from_str::<ClientEvent>(&text) else {
                            tracing::debug!(%session, %text, "[WS] ignoring malformed message");
                            continue;
                        };

                        let cmd = match client.action {
                            ClientAction::Draw => DeckCommand::Draw,
                            ClientAction::Shuffle => DeckCommand::Shuffle,
                        };
                        if deck_tx.send(cmd).await.is_err() {
                            break;
                        }
                    }

                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        tracing::debug!(%session, %err, "[WS] receive error");
                        break;
                    }
                }
            }
        }
    }

    let _ = deck_tx.send(DeckCommand::Unmount).await;
    tracing::info!(%session, "[WS] disconnected");
}

/// Re-renders from a snapshot and replays the latest notice if this socket
/// never saw it. Older missed notices cannot be recovered.
async fn resync(
    socket: &mut WebSocket,
    deck_tx: &mpsc::Sender<DeckCommand>,
    delivered: &mut u64,
) -> anyhow::Result<()> {
    let (reply, rx) = oneshot::channel();
    deck_tx.send(DeckCommand::Snapshot { reply }).await?;
    let snapshot = rx.await?;
    send(socket, &to_message(DeckEvent::View(snapshot.state.view()))).await?;

    let missed = snapshot.notices.saturating_sub(*delivered);
    if missed > 1 {
        tracing::warn!(missed, "[WS] notices dropped while lagging, replaying the latest only");
    }
    if missed > 0 {
        if let Some(notice) = snapshot.last_notice {
            send(socket, &to_message(notice)).await?;
        }
    }
    *delivered = snapshot.notices;
    Ok(())
}

async fn send(socket: &mut WebSocket, message: &ServerMessage) -> anyhow::Result<()> {
    let text = serde_json::to_string(message)?;
    socket.send(Message::Text(text)).await?;
    Ok(())
}

pub fn to_message(event: DeckEvent) -> ServerMessage {
    match event {
        DeckEvent::View(view) => ServerMessage::Render { html: view::render_app(&view), view },
        DeckEvent::Exhausted => ServerMessage::Alert { message: EXHAUSTED_MESSAGE.to_string() },
        DeckEvent::Failed { operation, error } => ServerMessage::Error {
            kind: error.kind(),
            operation,
            message: error.to_string(),
        },
    }
}
