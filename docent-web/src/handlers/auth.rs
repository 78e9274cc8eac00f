//! Sign-in, sign-out and session cookie handling

use axum::Form;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use docent_core::{AdminUser, AuthError, Credentials, SessionId};

use crate::components::{card, input, notification_toast, page_header};
use crate::server::AppState;
use crate::templates::base_template;

/// Name of the cookie carrying the admin session id.
pub const SESSION_COOKIE: &str = "docent_session";

/// Extracts the session id from the request cookies, if any.
pub fn session_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionId::parse(value))
}

/// Resolves the signed-in admin, or the redirect to the sign-in page.
pub(crate) fn require_admin(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(SessionId, AdminUser), Response> {
    session_from_headers(headers)
        .and_then(|id| state.sessions.current_user(id).map(|user| (id, user)))
        .ok_or_else(|| Redirect::to("/auth").into_response())
}

fn session_cookie(id: SessionId, max_age_secs: u64) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}

fn cleared_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Renders the sign-in form, or skips it when already signed in.
pub async fn auth_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if require_admin(&state, &headers).is_ok() {
        return Redirect::to("/admin").into_response();
    }

    Html(sign_in_page(None, None)).into_response()
}

/// Signs in and sets the session cookie.
///
/// A failed attempt re-renders the form with a dismissible error and keeps
/// the visitor on `/auth`.
pub async fn sign_in(
    State(state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> Response {
    match state.sessions.sign_in(&credentials).await {
        Ok(id) => {
            let cookie = session_cookie(id, state.config.admin.session_ttl.as_secs());
            ([(header::SET_COOKIE, cookie)], Redirect::to("/admin")).into_response()
        }
        Err(e) => {
            let status = match e {
                AuthError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::UNAUTHORIZED,
            };
            let html = sign_in_page(Some(&e.to_string()), Some(credentials.email.trim()));
            (status, Html(html)).into_response()
        }
    }
}

/// Ends the session and clears the cookie.
pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(id) = session_from_headers(&headers) {
        state.sessions.sign_out(id);
    }

    ([(header::SET_COOKIE, cleared_cookie())], Redirect::to("/")).into_response()
}

fn sign_in_page(error: Option<&str>, email: Option<&str>) -> String {
    let toast = error
        .map(|message| notification_toast(message, "error", true))
        .unwrap_or_default();

    let form = format!(
        r#"<form method="post" action="/auth">
            {}
            {}
            <button type="submit" class="btn btn-primary btn-wide">Sign In</button>
        </form>"#,
        input("email", "Email", "email", email),
        input("password", "Password", "password", None)
    );

    let content = format!(
        r#"{toast}
        <main class="screen">
            {}
            {}
        </main>"#,
        page_header("Admin Portal", Some("Sign in to manage exhibit QR codes")),
        card(Some("Sign In"), &form)
    );

    base_template("Sign In", "admin", &content)
}
