//! Notifications, spinners and the terminal error screen

use docent_core::ErrorKind;

use super::layout::{escape_html, link_button};

/// Renders a notification toast.
///
/// `toast_type` is one of `success`, `error` or `info`. Dismissible toasts
/// carry a close button and never change the current route.
pub fn notification_toast(message: &str, toast_type: &str, dismissible: bool) -> String {
    let (class, icon) = match toast_type {
        "success" => ("toast toast-success", "✓"),
        "error" => ("toast toast-error", "✗"),
        _ => ("toast toast-info", "i"),
    };

    let dismiss_button = if dismissible {
        r#"<button type="button" class="toast-close" aria-label="Dismiss" onclick="this.parentElement.remove()">×</button>"#
    } else {
        ""
    };

    format!(
        r#"<div class="{class}" role="status">
            <span class="toast-icon">{icon}</span>
            <span class="toast-message">{}</span>
            {dismiss_button}
        </div>"#,
        escape_html(message)
    )
}

/// Renders the loading spinner with an optional caption.
pub fn loading_spinner(caption: Option<&str>) -> String {
    let caption_html = caption
        .map(|c| format!(r#"<p class="spinner-caption">{}</p>"#, escape_html(c)))
        .unwrap_or_default();

    format!(
        r#"<div class="spinner-wrap">
            <div class="spinner" aria-hidden="true"></div>
            {caption_html}
        </div>"#
    )
}

/// Renders the terminal error screen with its single recovery action.
pub fn error_screen(kind: ErrorKind) -> String {
    format!(
        r#"<div class="error-screen" data-error="{}">
            <p class="error-message">{}</p>
            {}
        </div>"#,
        error_code(kind),
        escape_html(kind.user_message()),
        link_button("/", "Return to Home", "primary")
    )
}

/// Stable machine-readable name of an error kind.
pub fn error_code(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::NotFound => "not_found",
        ErrorKind::MediaUnavailable => "media_unavailable",
        ErrorKind::PlaybackFailed => "playback_failed",
        ErrorKind::Unauthenticated => "unauthenticated",
    }
}
