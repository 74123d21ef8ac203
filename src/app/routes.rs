use std::sync::Arc;

use axum::{response::Html, routing::get, Router};

use crate::infrastructure::DeckApi;
use crate::view;

pub fn create_routes<A: DeckApi>(api: Arc<A>) -> Router {
    Router::new()
        .route("/", get(|| async { Html(view::index_page()) }))
        .route(
            "/ws",
            get({
                let api = api.clone();
                move |ws| crate::web_socket::ws_handler(ws, api)
            }),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::scripted::ScriptedDeckApi;

    #[tokio::test]
    async fn test_index_is_served() {
        let (api, _calls) = ScriptedDeckApi::new();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, create_routes(api)).await.unwrap();
        });

        let response = reqwest::get(format!("http://{addr}/")).await.unwrap();
        assert!(response.status().is_success());
        let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));
        assert_eq!(response.text().await.unwrap(), view::index_page());
    }

    #[tokio::test]
    async fn test_ws_requires_upgrade() {
        let (api, _calls) = ScriptedDeckApi::new();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, create_routes(api)).await.unwrap();
        });

        let response = reqwest::get(format!("http://{addr}/ws")).await.unwrap();
        assert!(response.status().is_client_error());
    }
}
