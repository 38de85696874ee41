use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::game::engine::SharedWorld;
use crate::protocol::messages::{ClientMessage, MessageError, PlayerUpdate, ServerMessage};
use crate::server::hub::Hub;

#[derive(Clone)]
pub struct AppState {
    pub world: SharedWorld,
    pub hub: Hub,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    // Subscribe before joining so no snapshot after the init is missed
    let mut outbound = state.hub.subscribe();
    let (id, init) = connect(&state).await;

    let init_msg = match serde_json::to_string(&init) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("failed to encode init for {}: {}", id, e);
            disconnect(&state, id).await;
            return;
        }
    };
    if sender.send(Message::Text(init_msg.into())).await.is_err() {
        disconnect(&state, id).await;
        return;
    }

    // Frames meant for this socket only
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    // Task: forward broadcasts and direct replies to the websocket
    let mut forward_task = tokio::spawn(async move {
        loop {
            let text = tokio::select! {
                direct = rx.recv() => match direct {
                    Some(text) => text,
                    None => break,
                },
                frame = outbound.recv() => match frame {
                    Ok(frame) if frame.is_for(id) => frame.payload,
                    Ok(_) => continue,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("connection {} lagged, skipped {} frames", id, skipped);
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                },
            };
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // Task: receive events from the client
    let recv_state = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    if let Err(e) = handle_text(&recv_state, id, text.as_str()).await {
                        warn!("dropping message from {}: {}", id, e);
                        let reply = ServerMessage::Error {
                            message: e.to_string(),
                        };
                        if let Ok(json) = serde_json::to_string(&reply) {
                            let _ = tx.send(json);
                        }
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    // Whichever side ends first takes the other down with it
    tokio::select! {
        _ = &mut forward_task => recv_task.abort(),
        _ = &mut recv_task => forward_task.abort(),
    }

    disconnect(&state, id).await;
}

/// Register a brand-new player and build the `init` frame for it.
pub async fn connect(state: &AppState) -> (Uuid, ServerMessage) {
    let id = Uuid::new_v4();
    let mut world = state.world.write().await;
    world.join(id);
    info!(
        "New connection {} ({} connected)",
        id,
        world.registry.connection_count()
    );
    (id, world.init_for(id))
}

pub async fn handle_text(state: &AppState, id: Uuid, text: &str) -> Result<(), MessageError> {
    match ClientMessage::parse(text)? {
        ClientMessage::Update(update) => handle_update(state, id, update).await,
    }
}

/// Overwrite the sender's player and broadcast the result to everyone.
pub async fn handle_update(
    state: &AppState,
    id: Uuid,
    update: PlayerUpdate,
) -> Result<(), MessageError> {
    let snapshot = {
        let mut world = state.world.write().await;
        update.validate(&world.bounds)?;
        if !world.apply_update(id, &update) {
            return Ok(());
        }
        world.snapshot(None)
    };
    state.hub.send_all(&snapshot);
    Ok(())
}

pub async fn disconnect(state: &AppState, id: Uuid) {
    state
        .hub
        .send_all_except(id, &ServerMessage::RemovePlayer { id });
    let remaining = {
        let mut world = state.world.write().await;
        world.leave(id);
        world.registry.connection_count()
    };
    info!("Disconnected {} ({} connected)", id, remaining);
}
