//! Authenticator construction for a chosen authentication mode

use crate::auth::{AuthClient, AuthGrant, AuthMode, AuthStorage, Transport};
use crate::config::AppConfig;
use crate::credentials::CredentialSet;
use crate::error::Result;
use std::sync::Arc;

/// Decide which mode to build a client for
///
/// An explicit mode always wins. Without one, the mode of the last successful
/// authentication recorded in `storage` is used; if there is none, no mode
/// can be determined.
#[must_use]
pub fn resolve_mode(explicit: Option<AuthMode>, storage: &dyn AuthStorage) -> Option<AuthMode> {
    if let Some(mode) = explicit {
        return Some(mode);
    }

    if !storage.is_authenticated() {
        tracing::debug!("No previous authentication recorded");
        return None;
    }

    let mode = storage.auth_mode();
    if mode.is_none() {
        tracing::warn!("Storage reports an authentication but no readable mode");
    }
    mode
}

/// Build an authenticator client for `mode`
///
/// Returns `Ok(None)` when `mode` is `None` and `storage` holds no previous
/// authentication. Credentials are passed through unchecked; nothing here
/// performs network I/O.
///
/// # Errors
///
/// Returns an error if the transport cannot be built from
/// `config.base_url`.
pub fn build_client(
    credentials: &CredentialSet,
    mode: Option<AuthMode>,
    storage: Arc<dyn AuthStorage>,
    config: &AppConfig,
) -> Result<Option<AuthClient>> {
    let Some(mode) = resolve_mode(mode, storage.as_ref()) else {
        return Ok(None);
    };

    let grant = AuthGrant::for_mode(mode, credentials);
    tracing::debug!(%mode, ?grant, "Building auth client");

    let client = AuthClient::builder()
        .transport(Transport::new(&config.base_url, true)?)
        .grant(grant)
        .scopes(credentials.scopes.iter().cloned())
        .storage(storage)
        .logging(true)
        .build()?;

    Ok(Some(client))
}
