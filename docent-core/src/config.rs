//! Centralized configuration for Docent.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::path::PathBuf;
use std::time::Duration;

/// Central configuration for all Docent components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct DocentConfig {
    pub server: ServerConfig,
    pub playback: PlaybackConfig,
    pub admin: AdminConfig,
    /// JSON catalog to load instead of the built-in table
    pub catalog_path: Option<PathBuf>,
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Public origin used for QR links and the embed `origin` parameter
    pub public_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            public_base_url: "http://127.0.0.1:3000".to_string(),
        }
    }
}

impl ServerConfig {
    /// Returns the `host:port` pair to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Playback controller timing and autoplay policy.
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// Silence after which a loading player is treated as ready
    pub ready_timeout: Duration,
    /// Idle time before the custom controls hide again
    pub controls_hide_after: Duration,
    /// Start muted so browsers allow autoplay
    pub start_muted: bool,
    /// Ask the embedded player to start on its own
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            ready_timeout: Duration::from_secs(5),
            controls_hide_after: Duration::from_secs(3),
            start_muted: true,
            autoplay: true,
        }
    }
}

/// Admin account and session settings.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Email of the single configured administrator
    pub email: Option<String>,
    /// Password of the configured administrator
    pub password: Option<String>,
    /// Lifetime of an admin session
    pub session_ttl: Duration,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: None,
            password: None,
            session_ttl: Duration::from_secs(12 * 60 * 60), // 12 hours
        }
    }
}

impl AdminConfig {
    /// Whether an administrator account is configured at all.
    pub fn is_configured(&self) -> bool {
        self.email.is_some() && self.password.is_some()
    }
}

impl DocentConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary key lookup.
    ///
    /// Unparseable values are ignored and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("DOCENT_HOST") {
            config.server.host = host;
        }

        if let Some(port) = lookup("DOCENT_PORT").and_then(|p| p.parse::<u16>().ok()) {
            config.server.port = port;
        }

        if let Some(base_url) = lookup("DOCENT_PUBLIC_BASE_URL") {
            config.server.public_base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Some(path) = lookup("DOCENT_CATALOG") {
            config.catalog_path = Some(PathBuf::from(path));
        }

        // Playback policy overrides
        if let Some(ms) = lookup("DOCENT_READY_TIMEOUT_MS").and_then(|v| v.parse::<u64>().ok()) {
            config.playback.ready_timeout = Duration::from_millis(ms);
        }

        if let Some(ms) = lookup("DOCENT_CONTROLS_HIDE_MS").and_then(|v| v.parse::<u64>().ok()) {
            config.playback.controls_hide_after = Duration::from_millis(ms);
        }

        if let Some(muted) = lookup("DOCENT_START_MUTED").and_then(|v| v.parse::<bool>().ok()) {
            config.playback.start_muted = muted;
        }

        if let Some(autoplay) = lookup("DOCENT_AUTOPLAY").and_then(|v| v.parse::<bool>().ok()) {
            config.playback.autoplay = autoplay;
        }

        // Admin account overrides
        if let Some(email) = lookup("DOCENT_ADMIN_EMAIL") {
            config.admin.email = Some(email);
        }

        if let Some(password) = lookup("DOCENT_ADMIN_PASSWORD") {
            config.admin.password = Some(password);
        }

        if let Some(secs) = lookup("DOCENT_SESSION_TTL_SECS").and_then(|v| v.parse::<u64>().ok()) {
            config.admin.session_ttl = Duration::from_secs(secs);
        }

        config
    }

    /// Creates a configuration optimized for testing.
    pub fn for_testing() -> Self {
        Self {
            playback: PlaybackConfig {
                ready_timeout: Duration::from_millis(500),
                controls_hide_after: Duration::from_millis(300),
                start_muted: true,
                autoplay: true,
            },
            admin: AdminConfig {
                email: Some("curator@museum.test".to_string()),
                password: Some("correct horse".to_string()),
                session_ttl: Duration::from_secs(60),
            },
            ..Default::default()
        }
    }
}
