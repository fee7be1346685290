//! Application context: the loaded client and the cached bearer token
//!
//! The entry point builds one [`SampleApp`] and passes it to whatever needs
//! the client. Nothing here is global and nothing is locked; the context is
//! used from a single thread.

use crate::auth::{AuthClient, AuthMode, AuthStorage, Authenticator, FileStorage, Token};
use crate::config::AppConfig;
use crate::credentials::CredentialSet;
use crate::error::Result;
use crate::factory;
use std::sync::Arc;

/// Single-slot memo of the bearer token
///
/// Filled lazily from an authenticator's saved token, overwritten by
/// [`set`](Self::set), never expired or evicted.
#[derive(Debug, Default)]
pub struct BearerCache {
    token: Option<Token>,
}

impl BearerCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached token, without consulting any authenticator
    #[must_use]
    pub fn peek(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Cached token, loading it from `authenticator` on first use
    pub fn get_or_load<A>(&mut self, authenticator: Option<&A>) -> Option<&Token>
    where
        A: Authenticator + ?Sized,
    {
        if self.token.is_none() {
            self.token = authenticator
                .filter(|auth| auth.has_saved_token())
                .and_then(|auth| match auth.saved_token() {
                    Ok(token) => Some(token),
                    Err(e) => {
                        tracing::warn!("Could not load saved token: {e}");
                        None
                    }
                });
        }
        self.token.as_ref()
    }

    /// Replace the cached token
    pub fn set(&mut self, token: Token) {
        self.token = Some(token);
    }
}

/// Process-wide state of the sample application
#[derive(Debug)]
pub struct SampleApp {
    config: AppConfig,
    storage: Arc<dyn AuthStorage>,
    client: Option<AuthClient>,
    bearer: BearerCache,
}

impl SampleApp {
    /// Create the context with file-backed storage at `config.storage_path`
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let storage = Arc::new(FileStorage::with_path(config.storage_path.clone()));
        Self::with_storage(config, storage)
    }

    /// Create the context with a custom storage adapter
    #[must_use]
    pub fn with_storage(config: AppConfig, storage: Arc<dyn AuthStorage>) -> Self {
        Self {
            config,
            storage,
            client: None,
            bearer: BearerCache::new(),
        }
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Storage adapter shared with every client built by this context
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn AuthStorage> {
        &self.storage
    }

    /// Re-read the credentials and rebuild the client
    ///
    /// With `mode` unset, the mode of the last stored authentication is used.
    /// The previous client is replaced even when no new one can be built, but
    /// kept if loading fails. The cached bearer token is always kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials cannot be read or parsed, or if
    /// the transport cannot be built.
    pub fn load_client(&mut self, mode: Option<AuthMode>) -> Result<Option<&AuthClient>> {
        let credentials = CredentialSet::load(&self.config.credentials)?;
        self.client = factory::build_client(&credentials, mode, self.storage.clone(), &self.config)?;

        match &self.client {
            Some(client) => {
                tracing::debug!(mode = %client.mode(), "Auth client loaded");
            }
            None => {
                tracing::debug!("No auth client available");
            }
        }
        Ok(self.client.as_ref())
    }

    /// Currently loaded client
    #[must_use]
    pub fn client(&self) -> Option<&AuthClient> {
        self.client.as_ref()
    }

    /// Bearer token, loaded from the client's saved token on first use
    pub fn bearer(&mut self) -> Option<Token> {
        self.bearer.get_or_load(self.client.as_ref()).cloned()
    }

    /// Replace the cached bearer token, e.g. after a fresh authentication
    pub fn set_bearer(&mut self, token: Token) {
        self.bearer.set(token);
    }
}
