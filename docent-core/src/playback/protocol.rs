//! Wire format of the embedded player's cross-document messages
//!
//! Outbound commands and inbound events are JSON text. Inbound messages share
//! their channel with unrelated traffic, so decoding is parse-or-ignore: any
//! message that is not one of the events below decodes to `None`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Numeric state the video host reports for "playing".
const HOST_STATE_PLAYING: i64 = 1;
/// Numeric state the video host reports for "paused".
const HOST_STATE_PAUSED: i64 = 2;

/// Command sent to the embedded player. Fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerCommand {
    PlayVideo,
    PauseVideo,
    Mute,
    UnMute,
}

#[derive(Serialize)]
struct CommandMessage<'a> {
    event: &'static str,
    func: &'a str,
    args: &'a str,
}

impl PlayerCommand {
    /// Name of the player function this command invokes.
    pub fn func(self) -> &'static str {
        match self {
            PlayerCommand::PlayVideo => "playVideo",
            PlayerCommand::PauseVideo => "pauseVideo",
            PlayerCommand::Mute => "mute",
            PlayerCommand::UnMute => "unMute",
        }
    }

    /// Renders the JSON text posted to the player frame.
    pub fn to_message(self) -> String {
        let message = CommandMessage {
            event: "command",
            func: self.func(),
            args: "",
        };
        // Serializing a struct of string fields cannot fail
        serde_json::to_string(&message).unwrap_or_default()
    }

    pub(crate) fn for_playing(playing: bool) -> Self {
        if playing {
            PlayerCommand::PlayVideo
        } else {
            PlayerCommand::PauseVideo
        }
    }

    pub(crate) fn for_muted(muted: bool) -> Self {
        if muted {
            PlayerCommand::Mute
        } else {
            PlayerCommand::UnMute
        }
    }
}

/// Playback status reported by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    Playing,
    Paused,
}

/// Event decoded from an inbound player message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Ready,
    StateChanged(PlayerStatus),
    Error { code: Option<i64> },
}

#[derive(Deserialize)]
struct RawPlayerMessage {
    event: String,
    #[serde(default)]
    info: Option<Value>,
}

/// Decodes one inbound message, returning `None` for anything that is not a
/// player event this system understands.
///
/// State changes other than playing/paused (buffering, ended, cued) are
/// ignored rather than mapped.
pub fn parse_player_message(raw: &str) -> Option<PlayerEvent> {
    let message: RawPlayerMessage = match serde_json::from_str(raw) {
        Ok(message) => message,
        Err(e) => {
            tracing::trace!("Ignoring non-player message: {e}");
            return None;
        }
    };

    let info = message.info.as_ref().and_then(Value::as_i64);

    match message.event.as_str() {
        "onReady" => Some(PlayerEvent::Ready),
        "onStateChange" => match info {
            Some(HOST_STATE_PLAYING) => Some(PlayerEvent::StateChanged(PlayerStatus::Playing)),
            Some(HOST_STATE_PAUSED) => Some(PlayerEvent::StateChanged(PlayerStatus::Paused)),
            _ => None,
        },
        "onError" => Some(PlayerEvent::Error { code: info }),
        other => {
            tracing::trace!(event = other, "Ignoring unhandled player event");
            None
        }
    }
}
