//! WebSocket bridge between the player page and its playback controller
//!
//! The browser owns the embedded player frame; the controller lives here.
//! The page forwards raw frame messages and button presses over the socket,
//! and receives player commands to post into the frame plus every state
//! change to render. Each connection mounts its own controller on its own
//! message bus.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::Response;
use docent_core::config::PlaybackConfig;
use docent_core::playback::{PlayerCommand, UserAction};
use docent_core::{
    Catalog, ControllerError, MessageBus, PlaybackControllerHandle, PlaybackState,
    spawn_playback_controller,
};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};

use crate::server::AppState;

/// Message from the player page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Raw message the embedded player posted to the page
    Frame { data: String },
    TogglePlay,
    ToggleMute,
    Interact,
}

/// Message to the player page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServerFrame {
    /// JSON text to post into the player frame
    Command { message: String },
    State(PlaybackState),
}

/// Controller side of one connected player page.
#[derive(Debug)]
pub struct PlayerBridge {
    bus: MessageBus,
    handle: PlaybackControllerHandle,
}

/// Frames flowing from the controller back to the page.
pub struct BridgeOutbound {
    commands: mpsc::UnboundedReceiver<PlayerCommand>,
    state: watch::Receiver<PlaybackState>,
}

impl PlayerBridge {
    /// Mounts a controller for `route` on a fresh message bus.
    pub fn mount(
        route: &str,
        catalog: &Catalog,
        config: &PlaybackConfig,
    ) -> (Self, BridgeOutbound) {
        let bus = MessageBus::new();
        let (frame, commands) = mpsc::unbounded_channel();
        let handle = spawn_playback_controller(route, catalog, &bus, frame, config);

        let mut state = handle.watch_state();
        state.mark_changed();

        (Self { bus, handle }, BridgeOutbound { commands, state })
    }

    pub fn handle(&self) -> &PlaybackControllerHandle {
        &self.handle
    }

    /// Dispatches one text message from the page. Unparseable messages are
    /// ignored.
    ///
    /// # Errors
    /// - `ControllerError::Unmounted` - Controller already torn down
    pub async fn handle_client_text(&self, text: &str) -> Result<(), ControllerError> {
        let frame = match serde_json::from_str::<ClientFrame>(text) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::debug!("Ignoring malformed player socket message: {e}");
                return Ok(());
            }
        };

        let action = match frame {
            ClientFrame::Frame { data } => {
                self.bus.publish(data);
                return Ok(());
            }
            ClientFrame::TogglePlay => UserAction::TogglePlayPause,
            ClientFrame::ToggleMute => UserAction::ToggleMute,
            ClientFrame::Interact => UserAction::Interact,
        };

        self.handle.act(action).await.map(|_| ())
    }

    pub async fn unmount(&self) {
        self.handle.unmount().await;
    }
}

impl BridgeOutbound {
    /// Next frame to send, or `None` once the controller is gone.
    ///
    /// The first frame is always the current state.
    pub async fn next(&mut self) -> Option<ServerFrame> {
        tokio::select! {
            biased;

            changed = self.state.changed() => match changed {
                Ok(()) => Some(ServerFrame::State(self.state.borrow_and_update().clone())),
                Err(_) => self
                    .commands
                    .recv()
                    .await
                    .map(|command| ServerFrame::Command { message: command.to_message() }),
            },
            Some(command) = self.commands.recv() => {
                Some(ServerFrame::Command { message: command.to_message() })
            }
        }
    }
}

/// Upgrades to the player bridge socket for `route`.
pub async fn player_socket(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(route): Path<String>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state, route))
}

async fn handle_socket(socket: WebSocket, state: AppState, route: String) {
    let (mut sender, mut receiver) = socket.split();
    let (bridge, mut outbound) = PlayerBridge::mount(&route, &state.catalog, &state.config.playback);
    tracing::debug!(%route, "Player socket connected");

    let writer = tokio::spawn(async move {
        while let Some(frame) = outbound.next().await {
            let text = match serde_json::to_string(&frame) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("Failed to encode player frame: {e}");
                    continue;
                }
            };
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Text(text)) => {
                if let Err(e) = bridge.handle_client_text(text.as_str()).await {
                    tracing::debug!(%route, "Dropping player input: {e}");
                    break;
                }
            }
            Ok(Message::Close(_)) => break,
            Err(e) => {
                tracing::debug!(%route, "Player socket error: {e}");
                break;
            }
            _ => {}
        }
    }

    bridge.unmount().await;
    drop(bridge);
    if let Err(e) = writer.await {
        tracing::debug!("Player socket writer ended abnormally: {e}");
    }
    tracing::debug!(%route, "Player socket closed");
}
