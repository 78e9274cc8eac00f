//! Playback control for one embedded remote player
//!
//! A controller is mounted per route. It resolves the route, listens for the
//! player's events on the page-wide [`MessageBus`], owns the ready timeout
//! and controls auto-hide timers, and posts [`PlayerCommand`]s back to the
//! player frame. Transitions live in the pure [`PlaybackMachine`]; the actor
//! only schedules timers and moves messages.

pub mod actor;
pub mod bus;
pub mod commands;
pub mod embed;
pub mod handle;
pub mod protocol;
pub mod state;

pub use actor::{PlayerFrame, spawn_playback_controller};
pub use bus::{MessageBus, Subscription};
pub use commands::UserAction;
pub use embed::embed_url;
pub use handle::PlaybackControllerHandle;
pub use protocol::{PlayerCommand, PlayerEvent, PlayerStatus, parse_player_message};
pub use state::{PlaybackMachine, PlaybackPhase, PlaybackPolicy, PlaybackState};

/// Errors from talking to a mounted controller.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("Playback controller has been unmounted")]
    Unmounted,
}
