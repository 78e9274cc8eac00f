//! HTTP server for the museum guide
//!
//! Serves the visitor pages, the admin screens, a small JSON API and the
//! player WebSocket bridge from one axum router.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use docent_core::{BaseUrl, Catalog, DocentConfig, DocentError, SessionStore};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    add_exhibit, admin_page, api_exhibits, auth_page, generate_links, home_page, language_redirect,
    player_socket, remove_exhibit, scan_demo, scan_page, set_base_url, sign_in, sign_out,
    video_page,
};

/// Errors that stop the server from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error(transparent)]
    Core(#[from] DocentError),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub sessions: Arc<SessionStore>,
    pub config: Arc<DocentConfig>,
    /// Validated public base URL for QR links; its origin goes to the embed
    pub base_url: BaseUrl,
}

impl AppState {
    /// Builds state from configuration and an already loaded catalog.
    ///
    /// # Errors
    /// - `DocentError::Admin` - Configured public base URL is not an absolute http(s) URL
    pub fn new(config: DocentConfig, catalog: Catalog) -> Result<Self, DocentError> {
        let base_url = BaseUrl::parse(&config.server.public_base_url)?;
        let sessions = SessionStore::from_config(&config)?;

        if !config.admin.is_configured() {
            tracing::warn!(
                "No admin account configured, set DOCENT_ADMIN_EMAIL and DOCENT_ADMIN_PASSWORD to enable /admin"
            );
        }

        Ok(Self {
            catalog: Arc::new(catalog),
            sessions: Arc::new(sessions),
            config: Arc::new(config),
            base_url,
        })
    }
}

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Visitor pages
        .route("/", get(home_page))
        .route("/scan", get(scan_page))
        .route("/scan/demo", get(scan_demo))
        .route("/v/{route}", get(video_page))
        .route("/v/{exhibit_id}/language/{tag}", get(language_redirect))
        // Player bridge
        .route("/ws/player/{route}", get(player_socket))
        // Auth and admin
        .route("/auth", get(auth_page).post(sign_in))
        .route("/auth/signout", post(sign_out))
        .route("/admin", get(admin_page))
        .route("/admin/exhibits", post(add_exhibit))
        .route("/admin/exhibits/{exhibit_id}/remove", post(remove_exhibit))
        .route("/admin/base-url", post(set_base_url))
        .route("/admin/links", post(generate_links))
        // JSON API for the export tooling
        .route("/api/exhibits", get(api_exhibits))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Loads the catalog, binds the configured address and serves until Ctrl-C.
///
/// # Errors
/// - `WebError::Core` - Catalog could not be loaded or configuration is invalid
/// - `WebError::Bind` - Address already in use or not bindable
/// - `WebError::Serve` - Listener failed while serving
pub async fn run_server(config: DocentConfig) -> Result<(), WebError> {
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path).map_err(DocentError::from)?,
        None => Catalog::builtin(),
    };
    tracing::info!("Serving {} exhibits", catalog.len());

    let address = config.server.bind_address();
    let state = AppState::new(config, catalog)?;
    let public_url = state.base_url.clone();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| WebError::Bind {
            address: address.clone(),
            source,
        })?;

    tracing::info!("Museum guide running on http://{address} (public URL {public_url})");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(WebError::Serve)?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
