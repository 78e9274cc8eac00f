//! Handle for communicating with a playback controller actor.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};

use super::ControllerError;
use super::commands::{ControllerCommand, UserAction};
use super::state::PlaybackState;
use crate::resolver::{Resolution, ResolveError};

/// Handle for one mounted playback controller.
///
/// Cloneable. The controller unmounts when [`unmount`](Self::unmount) is
/// called or when the last handle is dropped.
#[derive(Clone)]
pub struct PlaybackControllerHandle {
    sender: mpsc::Sender<ControllerCommand>,
    state: watch::Receiver<PlaybackState>,
    resolution: Arc<Result<Resolution, ResolveError>>,
}

impl std::fmt::Debug for PlaybackControllerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackControllerHandle")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl PlaybackControllerHandle {
    pub(crate) fn new(
        sender: mpsc::Sender<ControllerCommand>,
        state: watch::Receiver<PlaybackState>,
        resolution: Arc<Result<Resolution, ResolveError>>,
    ) -> Self {
        Self {
            sender,
            state,
            resolution,
        }
    }

    /// Flips play/pause locally and asks the player to follow.
    ///
    /// Returns the state right after the optimistic update, before the
    /// player has confirmed anything.
    ///
    /// # Errors
    /// - `ControllerError::Unmounted` - Controller already torn down
    pub async fn toggle_play_pause(&self) -> Result<PlaybackState, ControllerError> {
        self.act(UserAction::TogglePlayPause).await
    }

    /// Flips mute locally and asks the player to follow.
    ///
    /// # Errors
    /// - `ControllerError::Unmounted` - Controller already torn down
    pub async fn toggle_mute(&self) -> Result<PlaybackState, ControllerError> {
        self.act(UserAction::ToggleMute).await
    }

    /// Shows the controls and restarts the auto-hide countdown.
    ///
    /// # Errors
    /// - `ControllerError::Unmounted` - Controller already torn down
    pub async fn interact(&self) -> Result<PlaybackState, ControllerError> {
        self.act(UserAction::Interact).await
    }

    /// Forwards a user action.
    ///
    /// # Errors
    /// - `ControllerError::Unmounted` - Controller already torn down
    pub async fn act(&self, action: UserAction) -> Result<PlaybackState, ControllerError> {
        let (responder, rx) = oneshot::channel();
        self.sender
            .send(ControllerCommand::Act { action, responder })
            .await
            .map_err(|_| ControllerError::Unmounted)?;

        rx.await.map_err(|_| ControllerError::Unmounted)
    }

    /// Unmounts the controller and waits until it has stopped.
    ///
    /// No timer or bus message is processed once this returns. Unmounting
    /// twice is harmless.
    pub async fn unmount(&self) {
        let (responder, rx) = oneshot::channel();
        if self
            .sender
            .send(ControllerCommand::Unmount { responder })
            .await
            .is_ok()
        {
            let _ = rx.await;
        }
    }

    /// Latest published state.
    pub fn state(&self) -> PlaybackState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn watch_state(&self) -> watch::Receiver<PlaybackState> {
        self.state.clone()
    }

    /// Outcome of resolving the route at mount time.
    pub fn resolution(&self) -> &Result<Resolution, ResolveError> {
        &self.resolution
    }

    /// Whether the controller task is still running.
    pub fn is_mounted(&self) -> bool {
        !self.sender.is_closed()
    }
}
