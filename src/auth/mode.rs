//! Authentication modes and the per-mode grant parameters

use crate::credentials::CredentialSet;
use crate::error::SampleAppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// OAuth grant flow used to authenticate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Authorization code flow for an installed app (client id + redirect URL)
    #[serde(alias = "INSTALLED_APP")]
    InstalledApp,
    /// Application-only flow, no user account involved
    #[serde(alias = "USERLESS")]
    Userless,
    /// Resource-owner password flow for personal scripts
    #[serde(alias = "SCRIPT")]
    Script,
}

impl AuthMode {
    /// All known modes
    pub const ALL: [Self; 3] = [Self::InstalledApp, Self::Userless, Self::Script];

    /// Stable name used in storage files and on the command line
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InstalledApp => "installed_app",
            Self::Userless => "userless",
            Self::Script => "script",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMode {
    type Err = SampleAppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "installed_app" => Ok(Self::InstalledApp),
            "userless" => Ok(Self::Userless),
            "script" => Ok(Self::Script),
            _ => Err(SampleAppError::unknown_auth_mode(s)),
        }
    }
}

/// Credentials handed to the authenticator, one variant per mode
///
/// Each variant carries exactly the fields its flow needs, so a client can
/// never be configured with a mix of installed-app and script parameters.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthGrant {
    /// Installed-app credentials
    InstalledApp {
        /// OAuth client id
        client_id: String,
        /// Redirect URL registered for the app
        redirect_url: String,
    },
    /// Userless credentials
    Userless {
        /// OAuth client id
        client_id: String,
    },
    /// Script credentials
    Script {
        /// Account username
        username: String,
        /// Account password
        password: String,
        /// Script client id
        client_id: String,
        /// Script client secret
        client_secret: String,
    },
}

impl AuthGrant {
    /// Pick the fields `mode` needs out of a credential set
    ///
    /// Values are copied as-is; empty or malformed fields surface later,
    /// when the authenticator actually talks to the provider.
    #[must_use]
    pub fn for_mode(mode: AuthMode, credentials: &CredentialSet) -> Self {
        match mode {
            AuthMode::InstalledApp => Self::InstalledApp {
                client_id: credentials.client_id.clone(),
                redirect_url: credentials.redirect_url.clone(),
            },
            AuthMode::Userless => Self::Userless {
                client_id: credentials.client_id.clone(),
            },
            AuthMode::Script => Self::Script {
                username: credentials.username.clone(),
                password: credentials.password.clone(),
                client_id: credentials.script_client_id.clone(),
                client_secret: credentials.script_client_secret.clone(),
            },
        }
    }

    /// The mode this grant belongs to
    #[must_use]
    pub const fn mode(&self) -> AuthMode {
        match self {
            Self::InstalledApp { .. } => AuthMode::InstalledApp,
            Self::Userless { .. } => AuthMode::Userless,
            Self::Script { .. } => AuthMode::Script,
        }
    }

    /// Client id sent to the provider
    #[must_use]
    pub fn client_id(&self) -> &str {
        match self {
            Self::InstalledApp { client_id, .. }
            | Self::Userless { client_id }
            | Self::Script { client_id, .. } => client_id,
        }
    }
}

impl fmt::Debug for AuthGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstalledApp {
                client_id,
                redirect_url,
            } => f
                .debug_struct("InstalledApp")
                .field("client_id", client_id)
                .field("redirect_url", redirect_url)
                .finish(),
            Self::Userless { client_id } => f
                .debug_struct("Userless")
                .field("client_id", client_id)
                .finish(),
            Self::Script {
                username,
                client_id,
                ..
            } => f
                .debug_struct("Script")
                .field("username", username)
                .field("client_id", client_id)
                .finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> CredentialSet {
        CredentialSet {
            client_id: "app-id".to_string(),
            redirect_url: "app://cb".to_string(),
            script_client_id: "script-id".to_string(),
            script_client_secret: "script-secret".to_string(),
            username: "bob".to_string(),
            password: "hunter2".to_string(),
            scopes: vec!["read".to_string()],
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("installed_app".parse::<AuthMode>().unwrap(), AuthMode::InstalledApp);
        assert_eq!("installed-app".parse::<AuthMode>().unwrap(), AuthMode::InstalledApp);
        assert_eq!("USERLESS".parse::<AuthMode>().unwrap(), AuthMode::Userless);
        assert_eq!(" script ".parse::<AuthMode>().unwrap(), AuthMode::Script);
        assert!(matches!(
            "implicit".parse::<AuthMode>(),
            Err(SampleAppError::UnknownAuthMode(_))
        ));
    }

    #[test]
    fn test_mode_display_parses_back() {
        for mode in AuthMode::ALL {
            assert_eq!(mode.to_string().parse::<AuthMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_mode_serde_accepts_legacy_names() {
        let mode: AuthMode = serde_json::from_str("\"INSTALLED_APP\"").unwrap();
        assert_eq!(mode, AuthMode::InstalledApp);
        assert_eq!(serde_json::to_string(&AuthMode::Script).unwrap(), "\"script\"");
    }

    #[test]
    fn test_installed_app_grant() {
        let grant = AuthGrant::for_mode(AuthMode::InstalledApp, &credentials());
        assert_eq!(
            grant,
            AuthGrant::InstalledApp {
                client_id: "app-id".to_string(),
                redirect_url: "app://cb".to_string(),
            }
        );
    }

    #[test]
    fn test_userless_grant_uses_app_client_id() {
        let grant = AuthGrant::for_mode(AuthMode::Userless, &credentials());
        assert_eq!(
            grant,
            AuthGrant::Userless {
                client_id: "app-id".to_string()
            }
        );
    }

    #[test]
    fn test_script_grant_uses_script_fields() {
        let grant = AuthGrant::for_mode(AuthMode::Script, &credentials());
        assert_eq!(grant.mode(), AuthMode::Script);
        assert_eq!(grant.client_id(), "script-id");
        let AuthGrant::Script {
            username,
            password,
            client_secret,
            ..
        } = grant
        else {
            panic!("expected script grant");
        };
        assert_eq!(username, "bob");
        assert_eq!(password, "hunter2");
        assert_eq!(client_secret, "script-secret");
    }

    #[test]
    fn test_empty_fields_pass_through() {
        let grant = AuthGrant::for_mode(AuthMode::Script, &CredentialSet::default());
        assert_eq!(grant.client_id(), "");
    }

    #[test]
    fn test_grant_debug_hides_password() {
        let grant = AuthGrant::for_mode(AuthMode::Script, &credentials());
        let debug = format!("{grant:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("script-secret"));
    }
}
