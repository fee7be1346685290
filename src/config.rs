//! Application configuration
//!
//! Settings come from the environment, falling back to defaults:
//!
//! | Variable                | Default                                   |
//! |-------------------------|-------------------------------------------|
//! | `SAMPLEAPP_BASE_URL`    | placeholder URL, not a real endpoint      |
//! | `SAMPLEAPP_CREDENTIALS` | credentials bundled with the application  |
//! | `SAMPLEAPP_STORAGE`     | `<config dir>/oauth-sampleapp/auth.json`  |
//! | `SAMPLEAPP_LOGGING`     | on (`0`, `false`, `off`, `no` turn it off) |

use crate::auth::default_storage_path;
use crate::credentials::CredentialSource;
use std::path::PathBuf;
use typed_builder::TypedBuilder;

/// Base URL handed to the transport when none is configured
pub const DEFAULT_BASE_URL: &str = "https://github.com";

/// Environment variable overriding the transport base URL
pub const ENV_BASE_URL: &str = "SAMPLEAPP_BASE_URL";
/// Environment variable pointing at a credentials XML file
pub const ENV_CREDENTIALS: &str = "SAMPLEAPP_CREDENTIALS";
/// Environment variable overriding the storage file path
pub const ENV_STORAGE: &str = "SAMPLEAPP_STORAGE";
/// Environment variable toggling log output
pub const ENV_LOGGING: &str = "SAMPLEAPP_LOGGING";

/// Settings for [`SampleApp`](crate::SampleApp)
#[derive(Debug, Clone, TypedBuilder)]
#[builder(
    builder_method(doc = "Create a new builder for AppConfig"),
    builder_type(doc = "Builder for AppConfig", vis = "pub"),
    build_method(doc = "Build the AppConfig")
)]
pub struct AppConfig {
    /// Base URL for the authenticator transport
    #[builder(default = DEFAULT_BASE_URL.to_string(), setter(into))]
    pub base_url: String,

    /// Where credentials are read from
    #[builder(default)]
    pub credentials: CredentialSource,

    /// Path of the authentication state file
    #[builder(default = default_storage_path(), setter(into))]
    pub storage_path: PathBuf,

    /// Emit log output; the client itself always logs through `tracing`
    #[builder(default = true)]
    pub logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AppConfig {
    /// Read configuration from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = Self::default();
        if let Some(base_url) = get(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(path) = get(ENV_CREDENTIALS) {
            config.credentials = CredentialSource::File(PathBuf::from(path));
        }
        if let Some(path) = get(ENV_STORAGE) {
            config.storage_path = PathBuf::from(path);
        }
        if let Some(logging) = get(ENV_LOGGING) {
            config.logging = parse_flag(&logging);
        }
        config
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}
