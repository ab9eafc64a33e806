//! Session context
//!
//! The signed-in user is held by an explicit [`Session`] that callers pass
//! to whatever needs it. It is loaded from a [`SessionStore`] on startup and
//! cleared on logout.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session data is corrupt: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub onboarding_complete: bool,
}

/// Persistence for the signed-in user.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<AuthUser>, SessionError>;

    async fn save(&self, user: &AuthUser) -> Result<(), SessionError>;

    async fn clear(&self) -> Result<(), SessionError>;
}

pub struct Session {
    store: Arc<dyn SessionStore>,
    user: Option<AuthUser>,
}

impl Session {
    /// Empty session; call [`Session::load`] to restore a saved user.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store, user: None }
    }

    /// Restores the saved user, if any.
    pub async fn load(&mut self) -> Result<Option<&AuthUser>, SessionError> {
        self.user = self.store.load().await?;
        Ok(self.user.as_ref())
    }

    pub async fn sign_in(&mut self, user: AuthUser) -> Result<(), SessionError> {
        self.store.save(&user).await?;
        self.user = Some(user);
        Ok(())
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Whether the signed-in user still has to go through onboarding.
    pub fn needs_onboarding(&self) -> bool {
        self.user.as_ref().is_some_and(|u| !u.onboarding_complete)
    }

    /// Flags the signed-in user as onboarded and persists it.
    ///
    /// Does nothing when nobody is signed in.
    pub async fn mark_onboarding_complete(&mut self) -> Result<(), SessionError> {
        let Some(user) = self.user.as_mut() else {
            return Ok(());
        };
        user.onboarding_complete = true;
        self.store.save(user).await?;

        #[cfg(feature = "tracing")]
        tracing::info!("Onboarding marked complete for user {}", user.id);

        Ok(())
    }

    pub async fn logout(&mut self) -> Result<(), SessionError> {
        self.user = None;
        self.store.clear().await
    }
}

/// In-process store, handy for hosts without persistence and for tests.
#[derive(Default)]
pub struct MemorySessionStore {
    user: Mutex<Option<AuthUser>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(user: AuthUser) -> Self {
        Self {
            user: Mutex::new(Some(user)),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<AuthUser>> {
        // a poisoned lock still holds a valid Option
        self.user.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<AuthUser>, SessionError> {
        Ok(self.slot().clone())
    }

    async fn save(&self, user: &AuthUser) -> Result<(), SessionError> {
        *self.slot() = Some(user.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.slot() = None;
        Ok(())
    }
}

/// JSON file store.
#[cfg(feature = "async")]
pub struct FileSessionStore {
    path: std::path::PathBuf,
}

#[cfg(feature = "async")]
impl FileSessionStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the configured `ANES_SESSION_PATH`.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(config.session_path.clone())
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(feature = "async")]
#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<AuthUser>, SessionError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn save(&self, user: &AuthUser) -> Result<(), SessionError> {
        use tokio::io::AsyncWriteExt;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(user)?;
        let mut file = tokio::fs::File::create(&self.path).await?;
        file.write_all(json.as_bytes()).await?;
        file.sync_all().await?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Session saved to {:?}", self.path);

        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
