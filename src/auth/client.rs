//! Authenticator client and its builder

use super::mode::{AuthGrant, AuthMode};
use super::storage::{AuthStorage, FileStorage};
use super::token::Token;
use super::transport::Transport;
use crate::error::{Result, SampleAppError};
use std::sync::Arc;

/// Anything that can report a previously persisted token
pub trait Authenticator {
    /// Whether a token from an earlier authentication is available
    fn has_saved_token(&self) -> bool;

    /// Fetch the token from an earlier authentication
    ///
    /// # Errors
    ///
    /// Returns `SampleAppError::TokenNotFound` if there is none, or a storage
    /// error if it cannot be read.
    fn saved_token(&self) -> Result<Token>;
}

/// Builder for [`AuthClient`]
#[derive(Debug, Default)]
pub struct AuthClientBuilder {
    transport: Option<Transport>,
    grant: Option<AuthGrant>,
    scopes: Vec<String>,
    storage: Option<Arc<dyn AuthStorage>>,
    logging: bool,
}

impl AuthClientBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP transport
    #[must_use]
    pub fn transport(mut self, transport: Transport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set the grant directly
    #[must_use]
    pub fn grant(mut self, grant: AuthGrant) -> Self {
        self.grant = Some(grant);
        self
    }

    /// Use installed-app credentials
    #[must_use]
    pub fn installed_app_credentials(
        self,
        client_id: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Self {
        self.grant(AuthGrant::InstalledApp {
            client_id: client_id.into(),
            redirect_url: redirect_url.into(),
        })
    }

    /// Use userless credentials
    #[must_use]
    pub fn userless_credentials(self, client_id: impl Into<String>) -> Self {
        self.grant(AuthGrant::Userless {
            client_id: client_id.into(),
        })
    }

    /// Use script credentials
    #[must_use]
    pub fn script_credentials(
        self,
        username: impl Into<String>,
        password: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.grant(AuthGrant::Script {
            username: username.into(),
            password: password.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        })
    }

    /// Set the scopes to request, in order
    #[must_use]
    pub fn scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the storage adapter (default: [`FileStorage`] at its default path)
    #[must_use]
    pub fn storage(mut self, storage: Arc<dyn AuthStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Enable or disable client logging (default: false)
    #[must_use]
    pub fn logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns `SampleAppError::InvalidConfig` if no transport or no
    /// credentials were set.
    pub fn build(self) -> Result<AuthClient> {
        let transport = self
            .transport
            .ok_or_else(|| SampleAppError::invalid_config("auth client needs a transport"))?;
        let grant = self
            .grant
            .ok_or_else(|| SampleAppError::invalid_config("auth client needs credentials"))?;
        let storage: Arc<dyn AuthStorage> = match self.storage {
            Some(storage) => storage,
            None => Arc::new(FileStorage::new()),
        };

        if self.logging {
            tracing::debug!(
                mode = %grant.mode(),
                base_url = %transport.base_url(),
                scopes = ?self.scopes,
                "Built auth client"
            );
        }

        Ok(AuthClient {
            transport,
            grant,
            scopes: self.scopes,
            storage,
            logging: self.logging,
        })
    }
}

/// Configured authenticator for one grant flow
#[derive(Debug, Clone)]
pub struct AuthClient {
    transport: Transport,
    grant: AuthGrant,
    scopes: Vec<String>,
    storage: Arc<dyn AuthStorage>,
    logging: bool,
}

impl AuthClient {
    /// Create a builder
    #[must_use]
    pub fn builder() -> AuthClientBuilder {
        AuthClientBuilder::new()
    }

    /// Mode this client authenticates with
    #[must_use]
    pub fn mode(&self) -> AuthMode {
        self.grant.mode()
    }

    /// Credentials this client was built with
    #[must_use]
    pub fn grant(&self) -> &AuthGrant {
        &self.grant
    }

    /// Requested scopes
    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// HTTP transport
    #[must_use]
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Storage adapter
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn AuthStorage> {
        &self.storage
    }

    /// Whether logging is enabled
    #[must_use]
    pub fn logging(&self) -> bool {
        self.logging
    }
}

impl Authenticator for AuthClient {
    fn has_saved_token(&self) -> bool {
        let saved = self.storage.has_saved_token();
        if self.logging {
            tracing::debug!(mode = %self.mode(), saved, "Checked for saved token");
        }
        saved
    }

    fn saved_token(&self) -> Result<Token> {
        let token = self.storage.load_token()?;
        if self.logging {
            tracing::debug!(mode = %self.mode(), expired = token.is_expired(), "Loaded saved token");
        }
        Ok(token)
    }
}
