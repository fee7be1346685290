//! # OAuth Sample Application
//!
//! Shows how an application wires an OAuth authenticator: static
//! credentials are read from an XML resource, an authenticator client is
//! built for one of three grant flows, and the bearer token is cached in
//! memory.
//!
//! ## Quick Start
//!
//! ```no_run
//! use oauth_sampleapp::{AppConfig, AuthMode, SampleApp};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut app = SampleApp::new(AppConfig::from_env());
//!
//!     // Reuse the mode of the last authentication, if any
//!     if app.load_client(None)?.is_none() {
//!         app.load_client(Some(AuthMode::InstalledApp))?;
//!     }
//!
//!     match app.bearer() {
//!         Some(token) => println!("Authorization: {}", token.authorization_header()),
//!         None => println!("Not authenticated yet"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Credentials
//!
//! The credentials resource is a flat list of tags, see [`credentials`]:
//!
//! ```xml
//! <credentials>
//!     <clientId>abc</clientId>
//!     <redirectUrl>app://cb</redirectUrl>
//!     <scope>read</scope>
//!     <scope>identity</scope>
//! </credentials>
//! ```
//!
//! ## Modes
//!
//! | Mode                        | Fields used                                                  |
//! |-----------------------------|--------------------------------------------------------------|
//! | [`AuthMode::InstalledApp`]  | `clientId`, `redirectUrl`                                    |
//! | [`AuthMode::Userless`]      | `clientId`                                                   |
//! | [`AuthMode::Script`]        | `username`, `password`, `scriptClientId`, `scriptClientSecret` |
//!
//! Every mode also sends the `scope` list.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod factory;

// Re-export commonly used types
pub use app::{BearerCache, SampleApp};
pub use auth::{
    AuthClient, AuthClientBuilder, AuthGrant, AuthMode, AuthStorage, Authenticator, FileStorage,
    MemoryStorage, Token, Transport,
};
pub use config::{AppConfig, AppConfigBuilder};
pub use credentials::{CredentialSet, CredentialSource};
pub use error::{Result, SampleAppError};
pub use factory::{build_client, resolve_mode};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
