//! Persistent storage adapters for the authentication state
//!
//! A storage adapter remembers which [`AuthMode`] was used for the last
//! successful authentication together with the token it produced, so a later
//! process can rebuild the same client without asking the user again.

use super::mode::AuthMode;
use super::token::Token;
use crate::error::{Result, SampleAppError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage abstraction for the persisted authentication state
pub trait AuthStorage: fmt::Debug + Send + Sync {
    /// Whether a previous authentication completed and its mode is known
    fn is_authenticated(&self) -> bool;

    /// Mode of the previous authentication, if one is recorded and readable
    fn auth_mode(&self) -> Option<AuthMode>;

    /// Whether a token is stored
    fn has_saved_token(&self) -> bool;

    /// Load the stored token
    ///
    /// # Errors
    ///
    /// Returns `SampleAppError::TokenNotFound` if nothing is stored, or an
    /// I/O or JSON error if the stored state cannot be read.
    fn load_token(&self) -> Result<Token>;

    /// Record a completed authentication
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be written.
    fn save(&self, mode: AuthMode, token: &Token) -> Result<()>;
}

/// On-disk layout of the authentication state
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredAuth {
    /// Kept as text so files written by other versions still load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<Token>,
}

impl StoredAuth {
    fn new(mode: AuthMode, token: &Token) -> Self {
        Self {
            mode: Some(mode.as_str().to_string()),
            token: Some(token.clone()),
        }
    }

    fn mode(&self) -> Option<AuthMode> {
        let raw = self.mode.as_deref()?;
        match raw.parse() {
            Ok(mode) => Some(mode),
            Err(e) => {
                tracing::warn!("Ignoring stored authentication mode: {e}");
                None
            }
        }
    }
}

/// File-backed storage using a single JSON document
#[derive(Debug, Clone)]
pub struct FileStorage {
    storage_path: PathBuf,
}

impl Default for FileStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStorage {
    /// Create storage at the default path (platform-specific config directory)
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage_path: default_storage_path(),
        }
    }

    /// Create storage with custom path
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: path.into(),
        }
    }

    /// Get the storage path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    fn read(&self) -> Result<Option<StoredAuth>> {
        let content = match std::fs::read_to_string(&self.storage_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Read the state, treating unreadable files as empty
    fn read_lenient(&self) -> Option<StoredAuth> {
        match self.read() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(path = %self.storage_path.display(), "Error reading auth state: {e}");
                None
            }
        }
    }
}

impl AuthStorage for FileStorage {
    fn is_authenticated(&self) -> bool {
        self.auth_mode().is_some()
    }

    fn auth_mode(&self) -> Option<AuthMode> {
        self.read_lenient().and_then(|stored| stored.mode())
    }

    fn has_saved_token(&self) -> bool {
        self.read_lenient().is_some_and(|stored| stored.token.is_some())
    }

    fn load_token(&self) -> Result<Token> {
        self.read()?
            .and_then(|stored| stored.token)
            .ok_or(SampleAppError::TokenNotFound)
    }

    fn save(&self, mode: AuthMode, token: &Token) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.storage_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&StoredAuth::new(mode, token))?;
        std::fs::write(&self.storage_path, &content)?;

        // Set restrictive permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.storage_path, perms)?;
        }

        tracing::debug!(path = %self.storage_path.display(), %mode, "Saved auth state");
        Ok(())
    }
}

/// Default location of the state file
#[must_use]
pub fn default_storage_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("oauth-sampleapp")
        .join("auth.json")
}

/// In-process storage; state is lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: Mutex<Option<StoredAuth>>,
}

impl MemoryStorage {
    /// Create empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage that already holds an authentication
    #[must_use]
    pub fn authenticated(mode: AuthMode, token: &Token) -> Self {
        Self {
            state: Mutex::new(Some(StoredAuth::new(mode, token))),
        }
    }

    fn snapshot(&self) -> Option<StoredAuth> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl AuthStorage for MemoryStorage {
    fn is_authenticated(&self) -> bool {
        self.auth_mode().is_some()
    }

    fn auth_mode(&self) -> Option<AuthMode> {
        self.snapshot().and_then(|stored| stored.mode())
    }

    fn has_saved_token(&self) -> bool {
        self.snapshot().is_some_and(|stored| stored.token.is_some())
    }

    fn load_token(&self) -> Result<Token> {
        self.snapshot()
            .and_then(|stored| stored.token)
            .ok_or(SampleAppError::TokenNotFound)
    }

    fn save(&self, mode: AuthMode, token: &Token) -> Result<()> {
        *self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(StoredAuth::new(mode, token));
        Ok(())
    }
}
