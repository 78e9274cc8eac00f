//! Visitor page handlers - home, scan, language selection and player

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use docent_core::language_select::LanguageSelector;
use docent_core::playback::embed_url;
use docent_core::{ErrorKind, LanguageTag, Resolution, resolve};
use rand::{Rng, rng};
use serde::Deserialize;

use crate::components::{
    card, error_screen, escape_html, language_button, link_button, page_header,
};
use crate::server::AppState;
use crate::templates::{VideoPlayerParams, base_template, video_player_content};

const GUIDE_NAME: &str = "Mustapha Pasha Palace";

/// Query parameters accepted on viewer routes.
#[derive(Debug, Deserialize)]
pub struct VideoQuery {
    /// Access token printed into older QR codes. Accepted and ignored.
    pub token: Option<String>,
}

/// Renders the landing page.
pub async fn home_page() -> Html<String> {
    let content = format!(
        r#"<main class="screen">
            <h1 class="hero-title">Museum Guide Experience</h1>
            <p class="hero-text">Discover our exhibits through interactive videos</p>
            {}
        </main>"#,
        link_button("/scan", "Scan QR Code", "primary")
    );

    Html(base_template("Welcome", "visitor", &content))
}

/// Renders the scan page.
///
/// Camera scanning happens outside this app; "Open Camera" simulates a scan
/// by jumping to a random exhibit after a short delay.
pub async fn scan_page() -> Html<String> {
    let body = format!(
        r#"<p class="card-title">Ready to Explore?</p>
        <p class="subtitle">Use your device's camera to scan the QR code at each exhibit</p>
        <a href="/scan/demo" id="open-camera" class="btn btn-primary btn-wide">Open Camera</a>
        {}
        <script>
            document.getElementById('open-camera').addEventListener('click', (event) => {{
                event.preventDefault();
                const button = event.currentTarget;
                button.textContent = 'Scanning...';
                button.classList.add('is-disabled');
                setTimeout(() => {{ window.location.href = button.href; }}, 2000);
            }});
        </script>"#,
        link_button("/", "Go Back", "outline")
    );

    let content = format!(
        r#"<main class="screen">
            {}
            {}
            <p class="hint">Point your camera at any {GUIDE_NAME} QR code</p>
        </main>"#,
        page_header(GUIDE_NAME, Some("Scan a QR code to continue your journey")),
        card(None, &body)
    );

    Html(base_template("Scan", "visitor", &content))
}

/// Redirects to a random catalog exhibit.
pub async fn scan_demo(State(state): State<AppState>) -> Redirect {
    let ids: Vec<_> = state.catalog.ids().collect();
    if ids.is_empty() {
        return Redirect::to("/scan");
    }

    let exhibit = ids[rng().random_range(0..ids.len())];
    tracing::debug!(%exhibit, "Simulated scan");
    Redirect::to(&format!("/v/{exhibit}"))
}

/// Renders the viewer route: language selection, player or error screen.
pub async fn video_page(
    State(state): State<AppState>,
    Path(route): Path<String>,
    Query(query): Query<VideoQuery>,
) -> Response {
    if query.token.is_some() {
        tracing::debug!(%route, "Ignoring access token on viewer route");
    }

    let resolution = match resolve(&route, &state.catalog) {
        Ok(resolution) => resolution,
        Err(e) => {
            tracing::info!(%route, error = %e, "Viewer route did not resolve");
            return error_response(e.kind());
        }
    };

    if let Some(selector) = LanguageSelector::for_resolution(&resolution) {
        return Html(language_page(&selector)).into_response();
    }

    player_page(&state, &route, &resolution)
}

/// Performs a language choice as a full navigation to the qualified route.
pub async fn language_redirect(
    State(state): State<AppState>,
    Path((exhibit_id, tag)): Path<(String, String)>,
) -> Response {
    let Some((id, descriptor)) = state.catalog.get(&exhibit_id) else {
        return error_response(ErrorKind::NotFound);
    };

    let Some(tag) = LanguageTag::from_code(&tag) else {
        tracing::debug!(exhibit = %id, language = %tag, "Unsupported language requested");
        return Redirect::to(&format!("/v/{id}")).into_response();
    };

    let mut selector = LanguageSelector::enter(id, descriptor);
    match selector.select(tag) {
        Ok(navigation) => Redirect::to(navigation.location()).into_response(),
        Err(e) => {
            tracing::warn!("Language selection failed: {e}");
            Redirect::to(&format!("/v/{id}")).into_response()
        }
    }
}

fn language_page(selector: &LanguageSelector) -> String {
    let buttons: String = selector
        .options()
        .iter()
        .map(|option| {
            let href = format!("/v/{}/language/{}", selector.exhibit_id(), option.tag);
            language_button(option, &href)
        })
        .collect();

    let description = selector
        .description()
        .map(|d| format!(r#"<p class="subtitle">{}</p>"#, escape_html(d)))
        .unwrap_or_default();

    let body = format!(
        r#"{description}
        <p class="field-label">Choose your language</p>
        <nav class="language-options" id="language-options">{buttons}</nav>"#
    );

    let content = format!(
        r#"<main class="screen">
            {}
            {}
            {}
        </main>
        <script>
            (function () {{
                const options = document.querySelectorAll('.language-option');
                const reset = () => options.forEach((o) => o.classList.remove('is-pending', 'is-disabled'));
                options.forEach((option) => option.addEventListener('click', (event) => {{
                    if (option.classList.contains('is-disabled') || option.classList.contains('is-pending')) {{
                        event.preventDefault();
                        return;
                    }}
                    options.forEach((o) => o.classList.add(o === option ? 'is-pending' : 'is-disabled'));
                }}));
                window.addEventListener('pageshow', reset);
            }})();
        </script>"#,
        page_header(GUIDE_NAME, None),
        card(Some(selector.title()), &body),
        link_button("/scan", "Scan another exhibit", "link")
    );

    base_template(selector.title(), "visitor", &content)
}

fn player_page(state: &AppState, route: &str, resolution: &Resolution) -> Response {
    let origin = state.base_url.origin();
    let embed = match embed_url(&resolution.media_ref, &origin, &state.config.playback) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(%route, media = %resolution.media_ref, "Cannot build embed URL: {e}");
            return error_response(ErrorKind::PlaybackFailed);
        }
    };

    let content = video_player_content(&VideoPlayerParams {
        route,
        title: resolution.title(),
        embed_url: embed.as_str(),
        embed_origin: &embed.origin().ascii_serialization(),
    });

    Html(base_template(resolution.title(), "player", &content)).into_response()
}

/// Terminal error screen with the status matching its kind.
pub(crate) fn error_response(kind: ErrorKind) -> Response {
    let status = match kind {
        ErrorKind::NotFound | ErrorKind::MediaUnavailable => StatusCode::NOT_FOUND,
        ErrorKind::PlaybackFailed => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
    };

    let content = format!(
        r#"<main class="screen">
            {}
            {}
        </main>"#,
        page_header(GUIDE_NAME, None),
        error_screen(kind)
    );

    (status, Html(base_template("Unavailable", "visitor", &content))).into_response()
}
