//! Video player page template

use docent_core::ErrorKind;

use crate::components::{error_code, escape_html, loading_spinner};

/// Values substituted into the player template.
pub struct VideoPlayerParams<'a> {
    /// Route identifier as requested, used for the bridge socket
    pub route: &'a str,
    pub title: &'a str,
    pub embed_url: &'a str,
    /// Origin the player frame posts from and accepts commands for
    pub embed_origin: &'a str,
}

/// Generates the video player page content.
pub fn video_player_content(params: &VideoPlayerParams<'_>) -> String {
    const VIDEO_PLAYER_TEMPLATE: &str = include_str!("../../templates/video_player.html");

    let error_messages: serde_json::Map<String, serde_json::Value> = [
        ErrorKind::NotFound,
        ErrorKind::MediaUnavailable,
        ErrorKind::PlaybackFailed,
    ]
    .into_iter()
    .map(|kind| (error_code(kind).to_string(), kind.user_message().into()))
    .collect();

    let socket_path = format!("/ws/player/{}", urlencoding::encode(params.route));

    VIDEO_PLAYER_TEMPLATE
        .replace("{{ spinner }}", &loading_spinner(Some("Loading video...")))
        .replace(
            "{{ error_messages }}",
            &serde_json::Value::Object(error_messages).to_string(),
        )
        .replace("{{ socket_path }}", &socket_path)
        .replace("{{ embed_origin }}", &escape_html(params.embed_origin))
        .replace("{{ embed_url }}", &escape_html(params.embed_url))
        .replace("{{ route }}", &escape_html(params.route))
        .replace("{{ title }}", &escape_html(params.title))
}
