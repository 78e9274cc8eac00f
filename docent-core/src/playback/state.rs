//! Playback state machine
//!
//! `PlaybackMachine` is synchronous and free of timers and I/O. It consumes
//! [`Input`]s and returns the [`Effect`]s the driver must carry out, which
//! keeps every transition testable without a runtime.

use serde::Serialize;

use super::protocol::{PlayerCommand, PlayerEvent, PlayerStatus};
use crate::ErrorKind;
use crate::config::PlaybackConfig;
use crate::resolver::{Resolution, ResolveError};

/// Coarse lifecycle phase derived from [`PlaybackState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPhase {
    Loading,
    Ready,
    Error,
}

/// Transient UI state of one controller instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackState {
    pub ready: bool,
    pub playing: bool,
    pub muted: bool,
    pub controls_visible: bool,
    /// A play/pause toggle was sent and the player has not reported back yet
    pub awaiting_confirmation: bool,
    pub error: Option<ErrorKind>,
}

impl PlaybackState {
    pub fn phase(&self) -> PlaybackPhase {
        if self.error.is_some() {
            PlaybackPhase::Error
        } else if self.ready {
            PlaybackPhase::Ready
        } else {
            PlaybackPhase::Loading
        }
    }
}

/// Everything that can drive the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Authoritative event from the player frame
    Player(PlayerEvent),
    TogglePlayPause,
    ToggleMute,
    /// Tap or click anywhere in the player region
    Interact,
    ReadyTimeoutElapsed,
    ControlsCountdownElapsed { generation: u64 },
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Send(PlayerCommand),
    StartReadyTimeout,
    CancelReadyTimeout,
    /// (Re)start the auto-hide countdown; any earlier one is superseded
    StartControlsCountdown { generation: u64 },
    CancelControlsCountdown,
}

/// Policy knobs fixed at mount time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackPolicy {
    pub start_muted: bool,
    pub autoplay: bool,
}

impl From<&PlaybackConfig> for PlaybackPolicy {
    fn from(config: &PlaybackConfig) -> Self {
        Self {
            start_muted: config.start_muted,
            autoplay: config.autoplay,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlaybackMachine {
    state: PlaybackState,
    policy: PlaybackPolicy,
    /// Last status the player itself reported
    observed: Option<PlayerStatus>,
    /// Playing value of the last toggle the player has not confirmed
    tentative_playing: Option<bool>,
    controls_generation: u64,
}

impl PlaybackMachine {
    /// Enters `Loading` and applies the resolution outcome.
    ///
    /// A failed resolution goes straight to the terminal error state and
    /// schedules nothing.
    pub fn mount(
        resolution: &Result<Resolution, ResolveError>,
        policy: PlaybackPolicy,
    ) -> (Self, Vec<Effect>) {
        let mut machine = Self {
            state: PlaybackState {
                ready: false,
                playing: false,
                muted: policy.start_muted,
                controls_visible: true,
                awaiting_confirmation: false,
                error: None,
            },
            policy,
            observed: None,
            tentative_playing: None,
            controls_generation: 0,
        };

        let effects = match resolution {
            Ok(_) => {
                machine.controls_generation += 1;
                vec![
                    Effect::StartReadyTimeout,
                    Effect::StartControlsCountdown {
                        generation: machine.controls_generation,
                    },
                ]
            }
            Err(err) => {
                machine.state.error = Some(err.kind());
                Vec::new()
            }
        };

        (machine, effects)
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.error.is_some()
    }

    /// Applies one input. Inputs arriving after an error are no-ops.
    pub fn apply(&mut self, input: Input) -> Vec<Effect> {
        if self.is_terminal() {
            return Vec::new();
        }

        match input {
            Input::Player(event) => self.on_player_event(event),
            Input::TogglePlayPause => self.toggle_play_pause(),
            Input::ToggleMute => self.toggle_mute(),
            Input::Interact => self.show_controls(),
            Input::ReadyTimeoutElapsed => self.on_ready_timeout(),
            Input::ControlsCountdownElapsed { generation } => {
                if generation == self.controls_generation {
                    self.state.controls_visible = false;
                }
                Vec::new()
            }
        }
    }

    fn on_player_event(&mut self, event: PlayerEvent) -> Vec<Effect> {
        match event {
            PlayerEvent::Ready => self.become_ready(),
            PlayerEvent::StateChanged(status) => {
                self.reconcile(status);
                if status == PlayerStatus::Playing {
                    self.become_ready()
                } else {
                    Vec::new()
                }
            }
            PlayerEvent::Error { code } => {
                tracing::warn!(?code, "Embedded player reported a playback error");
                self.state.error = Some(ErrorKind::PlaybackFailed);
                self.state.awaiting_confirmation = false;
                self.tentative_playing = None;
                vec![Effect::CancelReadyTimeout, Effect::CancelControlsCountdown]
            }
        }
    }

    /// Authoritative status always wins over an unconfirmed local toggle.
    fn reconcile(&mut self, status: PlayerStatus) {
        let playing = status == PlayerStatus::Playing;
        if let Some(expected) = self.tentative_playing.take() {
            if expected != playing {
                tracing::debug!(expected, playing, "Player overrode optimistic toggle");
            }
        }
        self.state.awaiting_confirmation = false;
        self.observed = Some(status);
        self.state.playing = playing;
    }

    fn become_ready(&mut self) -> Vec<Effect> {
        if self.state.ready {
            return Vec::new();
        }

        self.state.ready = true;
        self.state.playing = match self.observed {
            Some(status) => status == PlayerStatus::Playing,
            None => self.policy.autoplay,
        };
        vec![Effect::CancelReadyTimeout]
    }

    fn on_ready_timeout(&mut self) -> Vec<Effect> {
        if !self.state.ready {
            tracing::debug!("No ready signal from player, assuming it is ready");
            self.become_ready();
        }
        Vec::new()
    }

    fn toggle_play_pause(&mut self) -> Vec<Effect> {
        if !self.state.ready {
            return Vec::new();
        }

        let playing = !self.state.playing;
        self.state.playing = playing;
        self.tentative_playing = Some(playing);
        self.state.awaiting_confirmation = true;
        vec![Effect::Send(PlayerCommand::for_playing(playing))]
    }

    fn toggle_mute(&mut self) -> Vec<Effect> {
        if !self.state.ready {
            return Vec::new();
        }

        // The player never reports mute state, so the local flag stands
        let muted = !self.state.muted;
        self.state.muted = muted;
        vec![Effect::Send(PlayerCommand::for_muted(muted))]
    }

    fn show_controls(&mut self) -> Vec<Effect> {
        self.state.controls_visible = true;
        self.controls_generation += 1;
        vec![Effect::StartControlsCountdown {
            generation: self.controls_generation,
        }]
    }
}
