//! Command definitions for the playback controller actor.

use tokio::sync::oneshot;

use super::state::{Input, PlaybackState};

/// User actions a handle may forward to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    TogglePlayPause,
    ToggleMute,
    Interact,
}

impl From<UserAction> for Input {
    fn from(action: UserAction) -> Self {
        match action {
            UserAction::TogglePlayPause => Input::TogglePlayPause,
            UserAction::ToggleMute => Input::ToggleMute,
            UserAction::Interact => Input::Interact,
        }
    }
}

/// Commands that can be sent to the controller actor.
///
/// Each command carries a response channel so callers observe the state the
/// action produced.
pub enum ControllerCommand {
    /// Apply a user action and report the resulting state.
    Act {
        action: UserAction,
        responder: oneshot::Sender<PlaybackState>,
    },
    /// Tear the controller down, cancelling its timers and subscription.
    Unmount { responder: oneshot::Sender<()> },
}
