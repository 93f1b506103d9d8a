//! Public client surface + builder.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::core::QtError;

/// Default desktop UA to avoid trivial bot blocking.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/122.0.0.0 Safari/537.36"
);

/// Tencent quote endpoint base. The market-prefixed code goes in the `q` parameter.
pub(crate) const DEFAULT_BASE_QUOTE: &str = "https://qt.gtimg.cn/";

/// HTTP client for the Tencent quote endpoint.
///
/// Cheap to clone; the underlying `reqwest::Client` is shared. Holds no
/// per-request state; every fetch is a single independent round trip.
#[derive(Debug, Clone)]
pub struct QtClient {
    http: Client,
    base_quote: Url,
}

impl Default for QtClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl QtClient {
    /// Create a new builder.
    pub fn builder() -> QtClientBuilder {
        QtClientBuilder::default()
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn base_quote(&self) -> &Url {
        &self.base_quote
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct QtClientBuilder {
    user_agent: Option<String>,
    base_quote: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl QtClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the quote endpoint base (e.g., a mock server in tests).
    #[must_use]
    pub fn base_quote(mut self, url: Url) -> Self {
        self.base_quote = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns `QtError` if the default base URL fails to parse or the
    /// underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<QtClient, QtError> {
        let base_quote = match self.base_quote {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_QUOTE)?,
        };

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(QtClient { http, base_quote })
    }
}
