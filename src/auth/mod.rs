//! Authenticator client API
//!
//! Supports three OAuth grant flows, selected with [`AuthMode`]:
//!
//! - **Installed app**: authorization code flow with a registered redirect URL
//! - **Userless**: application-only access, no user account
//! - **Script**: resource-owner password flow for personal scripts
//!
//! # Example
//!
//! ```no_run
//! use oauth_sampleapp::auth::{AuthClient, Authenticator, FileStorage, Transport};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AuthClient::builder()
//!         .transport(Transport::new("https://example.com", true)?)
//!         .installed_app_credentials("my-client-id", "myapp://oauth/callback")
//!         .scopes(["identity", "read"])
//!         .storage(Arc::new(FileStorage::new()))
//!         .logging(true)
//!         .build()?;
//!
//!     if client.has_saved_token() {
//!         let token = client.saved_token()?;
//!         println!("Authorization: {}", token.authorization_header());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Storage
//!
//! [`FileStorage`] keeps the mode and token of the last authentication in the
//! platform-specific config directory (e.g. `~/.config/oauth-sampleapp/` on
//! Linux), written with user-only permissions (600).

mod client;
mod mode;
mod storage;
mod token;
mod transport;

pub use client::{AuthClient, AuthClientBuilder, Authenticator};
pub use mode::{AuthGrant, AuthMode};
pub use storage::{AuthStorage, FileStorage, MemoryStorage, default_storage_path};
pub use token::Token;
pub use transport::Transport;
