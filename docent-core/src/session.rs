//! Admin sign-in and session tracking
//!
//! Identity verification sits behind [`IdentityProvider`] so a hosted auth
//! service can replace the single configured account. Sessions live in
//! memory only and each one owns the administrator's [`AdminWorkspace`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use uuid::Uuid;

use crate::admin::{AdminError, AdminWorkspace, BaseUrl};
use crate::config::{AdminConfig, DocentConfig};

/// Errors from signing in or using a session.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email and password are required")]
    MissingCredentials,

    #[error("No administrator account is configured")]
    NotConfigured,

    #[error("No active session")]
    Unauthenticated,
}

/// Sign-in form contents.
#[derive(Clone, serde::Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signed-in administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminUser {
    pub email: String,
}

/// Verifies administrator credentials.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn verify(&self, credentials: &Credentials) -> Result<AdminUser, AuthError>;
}

/// Provider backed by the one account in [`AdminConfig`].
#[derive(Clone)]
pub struct StaticIdentityProvider {
    email: Option<String>,
    password: Option<String>,
}

impl StaticIdentityProvider {
    pub fn new(config: &AdminConfig) -> Self {
        Self {
            email: config.email.clone(),
            password: config.password.clone(),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn verify(&self, credentials: &Credentials) -> Result<AdminUser, AuthError> {
        let (Some(email), Some(password)) = (&self.email, &self.password) else {
            return Err(AuthError::NotConfigured);
        };

        let given_email = credentials.email.trim();
        if given_email.is_empty() || credentials.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        if given_email.eq_ignore_ascii_case(email) && credentials.password == *password {
            Ok(AdminUser {
                email: email.clone(),
            })
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Opaque session identifier carried in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a cookie value. Anything that is not a UUID yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
struct Session {
    user: AdminUser,
    expires_at: DateTime<Utc>,
    workspace: AdminWorkspace,
}

impl Session {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// In-memory session table.
pub struct SessionStore {
    provider: Arc<dyn IdentityProvider>,
    ttl: Duration,
    default_base_url: BaseUrl,
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("ttl", &self.ttl)
            .field("sessions", &self.sessions.read().len())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Creates a store. New sessions start with a workspace pointing at
    /// `default_base_url`.
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        ttl: Duration,
        default_base_url: BaseUrl,
    ) -> Self {
        Self {
            provider,
            ttl,
            default_base_url,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Store using the configured admin account, TTL and public base URL.
    ///
    /// # Errors
    /// - `AdminError::InvalidBaseUrl` - Configured public base URL is unusable
    pub fn from_config(config: &DocentConfig) -> Result<Self, AdminError> {
        Ok(Self::new(
            Arc::new(StaticIdentityProvider::new(&config.admin)),
            config.admin.session_ttl,
            BaseUrl::parse(&config.server.public_base_url)?,
        ))
    }

    /// Verifies `credentials` and opens a new session.
    ///
    /// # Errors
    /// - `AuthError::InvalidCredentials` - Provider rejected the credentials
    /// - `AuthError::MissingCredentials` - Email or password left blank
    /// - `AuthError::NotConfigured` - No account to sign in to
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<SessionId, AuthError> {
        let user = match self.provider.verify(credentials).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(email = %credentials.email, error = %e, "Admin sign-in rejected");
                return Err(e);
            }
        };

        let now = Utc::now();
        let expires_at = TimeDelta::from_std(self.ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let id = SessionId::generate();
        tracing::info!(email = %user.email, "Admin signed in");

        let mut sessions = self.sessions.write();
        sessions.retain(|_, session| !session.is_expired(now));
        sessions.insert(
            id,
            Session {
                user,
                expires_at,
                workspace: AdminWorkspace::new(self.default_base_url.clone()),
            },
        );
        Ok(id)
    }

    /// User behind `id`, or `None` when the session is unknown or expired.
    pub fn current_user(&self, id: SessionId) -> Option<AdminUser> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read();
            match sessions.get(&id) {
                None => return None,
                Some(session) if !session.is_expired(now) => return Some(session.user.clone()),
                Some(_) => {}
            }
        }

        tracing::debug!("Admin session expired");
        self.sessions.write().remove(&id);
        None
    }

    /// Ends a session. Returns whether one was open.
    pub fn sign_out(&self, id: SessionId) -> bool {
        let removed = self.sessions.write().remove(&id);
        if let Some(session) = &removed {
            tracing::info!(email = %session.user.email, "Admin signed out");
        }
        removed.is_some()
    }

    /// Runs `f` against the workspace of a live session.
    ///
    /// # Errors
    /// - `AuthError::Unauthenticated` - Session unknown or expired
    pub fn with_workspace<R>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut AdminWorkspace) -> R,
    ) -> Result<R, AuthError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write();
        let expired = sessions
            .get(&id)
            .map(|session| session.is_expired(now))
            .ok_or(AuthError::Unauthenticated)?;

        if expired {
            sessions.remove(&id);
            return Err(AuthError::Unauthenticated);
        }

        sessions
            .get_mut(&id)
            .map(|session| f(&mut session.workspace))
            .ok_or(AuthError::Unauthenticated)
    }

    /// Number of sessions not yet expired.
    pub fn active_sessions(&self) -> usize {
        let now = Utc::now();
        self.sessions
            .read()
            .values()
            .filter(|session| !session.is_expired(now))
            .count()
    }
}
