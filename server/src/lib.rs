//! HTTP and WebSocket front end for the SharedBoard hub.
//!
//! Every WebSocket on `/ws` becomes one hub connection: frames read from the
//! socket are decoded into client events and submitted, and everything the
//! hub addresses to the connection is written back as text frames.

use axum::{
    Router,
    extract::{
        ConnectInfo, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode},
    response::{Json, Response},
    routing::get,
};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use sharedboard_sync::{ClientEvent, Connection, HubHandle};
use sharedboard_types::BoardState;
use std::net::SocketAddr;
use tracing::{debug, info, warn};

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub hub: HubHandle,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub connections: usize,
    pub persistence: bool,
}

/// Returns the address to log for a client: the first `X-Forwarded-For`
/// entry when a proxy supplied one, otherwise the socket peer.
pub fn client_addr(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map_or_else(|| peer.ip().to_string(), str::to_string)
}

async fn board_handler(State(state): State<AppState>) -> Result<Json<BoardState>, StatusCode> {
    state
        .hub
        .snapshot()
        .await
        .map(Json)
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)
}

async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    let stats = state
        .hub
        .stats()
        .await
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        connections: stats.connections,
        persistence: stats.persistence,
    }))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Response {
    let client = client_addr(&headers, peer);
    ws.on_upgrade(move |socket| handle_socket(socket, state.hub, client))
}

async fn handle_socket(socket: WebSocket, hub: HubHandle, client: String) {
    let Connection { id, mut events } = match hub.connect().await {
        Ok(connection) => connection,
        Err(e) => {
            warn!("Refused client {}: {}", client, e);
            return;
        }
    };
    info!("Client {} connected from {}", id, client);

    let (mut sink, mut stream) = socket.split();

    let mut writer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            let text = match event.encode() {
                Ok(text) => text,
                Err(e) => {
                    warn!("Failed to encode event for {}: {}", id, e);
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let submitter = hub.clone();
    let mut reader = tokio::spawn(async move {
        while let Some(Ok(message)) = stream.next().await {
            match message {
                Message::Text(text) => match ClientEvent::decode(text.as_str()) {
                    Ok(event) => {
                        if submitter.submit(id, event).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => debug!("Dropped frame from {}: {}", id, e),
                },
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut writer => reader.abort(),
        _ = &mut reader => writer.abort(),
    }

    if let Err(e) = hub.disconnect(id).await {
        debug!("Hub gone while disconnecting {}: {}", id, e);
    }
    info!("Client {} disconnected ({})", id, client);
}

/// Build the router serving the board socket and HTTP API.
///
/// Serve it with `into_make_service_with_connect_info::<SocketAddr>()`; the
/// socket handler reads the peer address.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/api/v1/board", get(board_handler))
        .route("/api/v1/health", get(health_handler))
        .with_state(state)
}
