//! Admin workspace handlers - exhibit registration and QR link generation

use axum::Form;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use docent_core::{AdminError, AdminUser, AdminWorkspace, QrLink, SessionId};
use serde::Deserialize;

use super::auth::require_admin;
use crate::components::{
    card, exhibit_list, input, notification_toast, page_header, post_button, qr_link_list,
};
use crate::server::AppState;
use crate::templates::base_template;

#[derive(Debug, Deserialize)]
pub struct ExhibitForm {
    pub exhibit_id: String,
}

#[derive(Debug, Deserialize)]
pub struct BaseUrlForm {
    pub base_url: String,
}

/// Outcome banner shown above the admin dashboard.
enum Notice<'a> {
    Success(String),
    Error(&'a AdminError),
}

/// Renders the admin dashboard for the signed-in session.
pub async fn admin_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (id, user) = match require_admin(&state, &headers) {
        Ok(admin) => admin,
        Err(redirect) => return redirect,
    };

    render_admin(&state, id, &user, None, None, StatusCode::OK)
}

/// Registers an exhibit id in the session workspace.
pub async fn add_exhibit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ExhibitForm>,
) -> Response {
    let (id, user) = match require_admin(&state, &headers) {
        Ok(admin) => admin,
        Err(redirect) => return redirect,
    };

    let outcome = state
        .sessions
        .with_workspace(id, |workspace| {
            workspace.add_exhibit(&form.exhibit_id).map(|_| ())
        });
    finish_edit(&state, id, &user, outcome)
}

/// Removes an exhibit id from the session workspace.
pub async fn remove_exhibit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(exhibit_id): Path<String>,
) -> Response {
    let (id, user) = match require_admin(&state, &headers) {
        Ok(admin) => admin,
        Err(redirect) => return redirect,
    };

    let outcome = state
        .sessions
        .with_workspace(id, |workspace| {
            workspace.remove_exhibit(&exhibit_id).map(|_| ())
        });
    finish_edit(&state, id, &user, outcome)
}

/// Changes the base URL used for generated links.
pub async fn set_base_url(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<BaseUrlForm>,
) -> Response {
    let (id, user) = match require_admin(&state, &headers) {
        Ok(admin) => admin,
        Err(redirect) => return redirect,
    };

    let outcome = state
        .sessions
        .with_workspace(id, |workspace| {
            workspace.set_base_url(&form.base_url).map(|_| ())
        });
    finish_edit(&state, id, &user, outcome)
}

/// Generates one QR link per registered exhibit.
pub async fn generate_links(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (id, user) = match require_admin(&state, &headers) {
        Ok(admin) => admin,
        Err(redirect) => return redirect,
    };

    let generated = state.sessions.with_workspace(id, |workspace| {
        workspace
            .generate_links(&state.catalog)
            .map(|links| (links, workspace.base_url().clone()))
    });

    match generated {
        Ok(Ok((links, base_url))) => {
            let message = format!(
                "Created {} QR code URLs using base URL: {base_url}",
                links.len()
            );
            render_admin(
                &state,
                id,
                &user,
                Some(Notice::Success(message)),
                Some(&links),
                StatusCode::OK,
            )
        }
        Ok(Err(e)) => render_admin(
            &state,
            id,
            &user,
            Some(Notice::Error(&e)),
            None,
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        Err(_) => Redirect::to("/auth").into_response(),
    }
}

/// Redirects back to the dashboard on success, re-renders with the error
/// otherwise.
fn finish_edit(
    state: &AppState,
    id: SessionId,
    user: &AdminUser,
    outcome: Result<Result<(), AdminError>, docent_core::AuthError>,
) -> Response {
    match outcome {
        Ok(Ok(())) => Redirect::to("/admin").into_response(),
        Ok(Err(e)) => {
            tracing::debug!("Admin edit rejected: {e}");
            render_admin(
                state,
                id,
                user,
                Some(Notice::Error(&e)),
                None,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        }
        Err(_) => Redirect::to("/auth").into_response(),
    }
}

fn render_admin(
    state: &AppState,
    id: SessionId,
    user: &AdminUser,
    notice: Option<Notice<'_>>,
    links: Option<&[QrLink]>,
    status: StatusCode,
) -> Response {
    let Ok(workspace) = state.sessions.with_workspace(id, |workspace| workspace.clone()) else {
        return Redirect::to("/auth").into_response();
    };

    let toast = match notice {
        Some(Notice::Success(message)) => notification_toast(&message, "success", true),
        Some(Notice::Error(e)) => notification_toast(&e.to_string(), "error", true),
        None => String::new(),
    };

    (status, Html(admin_document(user, &workspace, &toast, links))).into_response()
}

fn admin_document(
    user: &AdminUser,
    workspace: &AdminWorkspace,
    toast: &str,
    links: Option<&[QrLink]>,
) -> String {
    let base_url_form = format!(
        r#"<form method="post" action="/admin/base-url">
            {}
            <button type="submit" class="btn btn-outline">Save</button>
        </form>"#,
        input("base_url", "Base URL", "url", Some(workspace.base_url().as_str()))
    );

    let exhibits_form = format!(
        r#"<form method="post" action="/admin/exhibits">
            {}
            <button type="submit" class="btn btn-outline">Add Exhibit</button>
        </form>
        {}
        {}"#,
        input("exhibit_id", "Exhibit ID", "text", None),
        exhibit_list(workspace.exhibits()),
        post_button("/admin/links", "Generate QR Codes", "primary")
    );

    let links_card = links
        .map(|links| card(Some("Generated Links"), &qr_link_list(links)))
        .unwrap_or_default();

    let content = format!(
        r#"{toast}
        <main class="screen">
            {}
            {}
            {}
            {links_card}
            {}
        </main>"#,
        page_header("Admin Portal", Some(&format!("Signed in as {}", user.email))),
        card(Some("Link Settings"), &base_url_form),
        card(Some("Exhibits"), &exhibits_form),
        post_button("/auth/signout", "Sign Out", "outline")
    );

    base_template("Admin", "admin", &content)
}
