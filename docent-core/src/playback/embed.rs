//! Embed URL for the remote video player

use url::Url;

use crate::catalog::MediaReferenceId;
use crate::config::PlaybackConfig;

const EMBED_BASE: &str = "https://www.youtube-nocookie.com/embed";

/// Builds the privacy-enhanced embed URL for `media_ref`.
///
/// The player is driven entirely through [`super::PlayerCommand`] messages, so
/// native controls, keyboard and fullscreen are disabled. `origin` must be
/// the page origin for the host to accept JS API messages.
///
/// # Errors
/// - `url::ParseError` - `media_ref` cannot form a valid URL path
pub fn embed_url(
    media_ref: &MediaReferenceId,
    origin: &str,
    config: &PlaybackConfig,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(EMBED_BASE)?;
    url.path_segments_mut()
        .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .push(media_ref.as_str());

    let flag = |on: bool| if on { "1" } else { "0" };

    url.query_pairs_mut()
        .append_pair("enablejsapi", "1")
        .append_pair("controls", "0")
        .append_pair("rel", "0")
        .append_pair("modestbranding", "1")
        .append_pair("playsinline", "1")
        .append_pair("iv_load_policy", "3")
        .append_pair("fs", "0")
        .append_pair("disablekb", "1")
        .append_pair("loop", "1")
        .append_pair("playlist", media_ref.as_str())
        .append_pair("autoplay", flag(config.autoplay))
        .append_pair("mute", flag(config.start_muted))
        .append_pair("origin", origin);

    Ok(url)
}
