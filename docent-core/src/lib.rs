//! Docent Core - Exhibit resolution and playback control
//!
//! This crate provides the building blocks of the museum guide: the static
//! exhibit catalog, route identifier resolution, the playback controller that
//! drives an embedded remote player, language selection, QR link export and
//! the admin session collaborator.

pub mod admin;
pub mod catalog;
pub mod config;
pub mod language_select;
pub mod playback;
pub mod resolver;
pub mod session;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use admin::{AdminError, AdminWorkspace, BaseUrl, QrLink, catalog_links};
pub use catalog::{
    Catalog, CatalogError, ExhibitId, LanguageTag, MediaDescriptor, MediaReferenceId,
};
pub use config::DocentConfig;
pub use language_select::{LanguageSelector, Navigation, SelectionError};
pub use playback::{
    ControllerError, MessageBus, PlaybackControllerHandle, PlaybackState,
    spawn_playback_controller,
};
pub use resolver::{Resolution, ResolveError, resolve};
pub use session::{
    AdminUser, AuthError, Credentials, IdentityProvider, SessionId, SessionStore,
    StaticIdentityProvider,
};

/// Failure categories a viewer or administrator can observe.
///
/// Every module error maps onto one of these so pages can pick their
/// messaging without matching on module-specific variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Identifier is not in the catalog.
    NotFound,
    /// Identifier is known but has no playable media after fallback.
    MediaUnavailable,
    /// The embedded player reported a runtime error.
    PlaybackFailed,
    /// Admin surface requested without an active session.
    Unauthenticated,
}

impl ErrorKind {
    /// Returns the message shown on the terminal error screen.
    pub fn user_message(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "Video not found.",
            ErrorKind::MediaUnavailable => "This exhibit has no video available yet.",
            ErrorKind::PlaybackFailed => "The video could not be played.",
            ErrorKind::Unauthenticated => "Please sign in to continue.",
        }
    }
}

/// Core errors that can bubble up from any Docent subsystem.
#[derive(Debug, thiserror::Error)]
pub enum DocentError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Admin error: {0}")]
    Admin(#[from] AdminError),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocentError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            DocentError::Resolve(e) => e.kind().user_message().to_string(),
            DocentError::Admin(e) => e.to_string(),
            DocentError::Catalog(_) => "The exhibit catalog could not be loaded".to_string(),
            DocentError::Configuration { .. } => "Configuration error occurred".to_string(),
            DocentError::Io(_) => "File system error occurred".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DocentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_errors_surface_distinct_messages() {
        let not_found = DocentError::from(ResolveError::NotFound {
            exhibit_id: "nope".to_string(),
        });
        let unavailable = DocentError::from(ResolveError::MediaUnavailable {
            exhibit_id: "sample".to_string(),
        });

        assert_ne!(not_found.user_message(), unavailable.user_message());
    }

    #[test]
    fn test_admin_errors_keep_their_detail() {
        let err = DocentError::from(AdminError::NoExhibits);
        assert_eq!(
            err.user_message(),
            "Add at least one exhibit before generating links"
        );

        let io = DocentError::from(std::io::Error::other("disk full"));
        assert_eq!(io.user_message(), "File system error occurred");
    }
}
