//! JSON API used by export tooling

use axum::Json;
use axum::extract::State;
use docent_core::{QrLink, catalog_links};

use crate::server::AppState;

/// Lists every catalog exhibit with its public viewer URL.
pub async fn api_exhibits(State(state): State<AppState>) -> Json<Vec<QrLink>> {
    Json(catalog_links(&state.catalog, &state.base_url))
}
