//! Admin session
//!
//! The bearer token and user an admin client works under. The session is an
//! explicit value owned by whoever drives the admin API; persistence goes
//! through a [`TokenStore`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::domain::events::{DomainEvent, SessionEvent};
use crate::{AuthUser, LoginResponse, Result, StorefrontError};

#[derive(Clone, Debug, Default)]
pub struct AdminSession {
    token: Option<String>,
    user: Option<AuthUser>,
    started_at: Option<DateTime<Utc>>,
    events: Vec<DomainEvent>,
}

impl AdminSession {
    pub fn new() -> Self { Self::default() }

    /// Resumes from a persisted token. The user is unknown until `/api/auth/me` answers.
    pub fn restore(token: impl Into<String>) -> Self {
        let mut session = Self { token: Some(token.into()), started_at: Some(Utc::now()), ..Default::default() };
        session.raise_event(DomainEvent::Session(SessionEvent::Restored));
        session
    }

    pub fn token(&self) -> Option<&str> { self.token.as_deref() }
    pub fn user(&self) -> Option<&AuthUser> { self.user.as_ref() }
    pub fn started_at(&self) -> Option<DateTime<Utc>> { self.started_at }
    pub fn is_authenticated(&self) -> bool { self.token.is_some() }

    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    pub fn begin(&mut self, login: LoginResponse) {
        let username = login.user.username.clone();
        self.token = Some(login.token);
        self.user = Some(login.user);
        self.started_at = Some(Utc::now());
        self.raise_event(DomainEvent::Session(SessionEvent::LoggedIn { username }));
    }

    pub fn set_user(&mut self, user: AuthUser) { self.user = Some(user); }

    pub fn end(&mut self) {
        let username = self.user.as_ref().map(|u| u.username.clone());
        self.clear();
        self.raise_event(DomainEvent::Session(SessionEvent::LoggedOut { username }));
    }

    pub fn expire(&mut self) {
        if self.token.is_none() {
            return;
        }
        self.clear();
        self.raise_event(DomainEvent::Session(SessionEvent::Expired));
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
    fn clear(&mut self) {
        self.token = None;
        self.user = None;
        self.started_at = None;
    }
}

// =============================================================================
// Token persistence
// =============================================================================

/// Where the bearer token survives between runs.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore(Mutex<Option<String>>);

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.lock()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}

impl MemoryTokenStore {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.0.lock().map_err(|_| StorefrontError::StorageError("token store poisoned".to_string()))
    }
}

#[derive(Serialize, Deserialize)]
struct StoredToken {
    token: String,
    saved_at: DateTime<Utc>,
}

/// Keeps the token in a small JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
    pub fn path(&self) -> &std::path::Path { &self.path }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorefrontError::StorageError(e.to_string())),
        };
        match serde_json::from_str::<StoredToken>(&raw) {
            Ok(stored) => Ok(Some(stored.token)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding unreadable token file");
                Ok(None)
            }
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        let stored = StoredToken { token: token.to_string(), saved_at: Utc::now() };
        let body = serde_json::to_string(&stored)?;
        std::fs::write(&self.path, body).map_err(|e| StorefrontError::StorageError(e.to_string()))
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorefrontError::StorageError(e.to_string())),
        }
    }
}
