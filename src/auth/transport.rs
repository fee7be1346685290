//! HTTP transport handed to the authenticator

use crate::error::{Result, SampleAppError};
use reqwest::Url;

/// HTTP client bound to a base URL
///
/// Building a transport never touches the network; requests are made later
/// by whoever holds the client.
#[derive(Debug, Clone)]
pub struct Transport {
    base_url: Url,
    debug: bool,
    http: reqwest::Client,
}

impl Transport {
    /// Build a transport for `base_url`
    ///
    /// With `debug` on, the HTTP client logs connection-level traffic at
    /// trace level.
    ///
    /// # Errors
    ///
    /// Returns `SampleAppError::InvalidUrl` if the URL does not parse, or an
    /// HTTP error if the client cannot be initialized.
    pub fn new(base_url: &str, debug: bool) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| SampleAppError::invalid_url(base_url, e))?;
        if parsed.cannot_be_a_base() {
            return Err(SampleAppError::invalid_url(base_url, "cannot be used as a base URL"));
        }

        let http = reqwest::Client::builder()
            .connection_verbose(debug)
            .build()?;

        Ok(Self {
            base_url: parsed,
            debug,
            http,
        })
    }

    /// Base URL requests are resolved against
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether debug logging is on
    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Underlying HTTP client
    #[must_use]
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}
