//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming read-only commands and forwarding raffle events.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use crate::domain::RaffleEvent;
use crate::service::RaffleService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and answers them inline.
/// - Forwards every event from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<RaffleEvent>,
    raffle_service: Arc<RaffleService>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &raffle_service).await;
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            // Event from EventBus
            event = event_rx.recv() => {
                match event {
                    Ok(raffle_event) => {
                        let msg = WsMessage {
                            id: uuid::Uuid::new_v4().to_string(),
                            msg_type: WsMessageType::Event,
                            timestamp: chrono::Utc::now(),
                            payload: serde_json::to_value(&raffle_event).unwrap_or_default(),
                        };
                        let json = serde_json::to_string(&msg).unwrap_or_default();
                        if ws_tx.send(Message::text(json)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Handles a text message from the client, returning an optional JSON response.
async fn handle_text_message(text: &str, service: &Arc<RaffleService>) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        let err = WsMessage {
            id: String::new(),
            msg_type: WsMessageType::Error,
            timestamp: chrono::Utc::now(),
            payload: serde_json::json!({
                "code": 400,
                "message": "malformed JSON"
            }),
        };
        return serde_json::to_string(&err).ok();
    };

    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload.clone()) else {
        let err = WsMessage {
            id: msg.id,
            msg_type: WsMessageType::Error,
            timestamp: chrono::Utc::now(),
            payload: serde_json::json!({
                "code": 404,
                "message": "unknown command"
            }),
        };
        return serde_json::to_string(&err).ok();
    };

    let payload = match command {
        WsCommand::ListEntrants => {
            let entrants = service.list_entrants().await;
            let count = entrants.len();
            serde_json::json!({
                "entrants": entrants,
                "count": count,
            })
        }
        WsCommand::GetPool => {
            let details = service.pool_details().await;
            serde_json::json!({
                "account": details.account,
                "manager": details.manager,
                "min_stake": details.min_stake.to_string(),
                "pot": details.pot.to_string(),
                "entrant_count": details.entrant_count,
                "draw_count": details.draw_count,
            })
        }
    };

    let response = WsMessage {
        id: msg.id,
        msg_type: WsMessageType::Response,
        timestamp: chrono::Utc::now(),
        payload,
    };
    serde_json::to_string(&response).ok()
}
