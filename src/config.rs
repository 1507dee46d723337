use std::{fmt, time::Duration};

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::{error::Error, result::Result};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("danbooru-rs/", env!("CARGO_PKG_VERSION"));

/// Minimum spacing between requests when none is configured.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 1000;

/// Printed in place of secrets by `Debug` impls.
pub(crate) const REDACTED: &str = "<redacted>";

/// The site a client talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    /// `https://danbooru.donmai.us/`
    #[default]
    Danbooru,
    /// `https://safebooru.donmai.us/`
    Safebooru,
    /// Any other instance running the same software.
    Custom(String),
}

impl Site {
    /// Returns the base URL of the site as written.
    pub fn url(&self) -> &str {
        match self {
            Site::Danbooru => "https://danbooru.donmai.us/",
            Site::Safebooru => "https://safebooru.donmai.us/",
            Site::Custom(url) => url,
        }
    }

    /// Parses the base URL, forcing a trailing slash so that relative
    /// endpoint paths join beneath it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the URL does not parse or cannot be a base.
    pub fn base_url(&self) -> Result<Url> {
        let mut raw = self.url().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw).map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(raw));
        }
        Ok(url)
    }
}

/// Client configuration.
///
/// Every field has a default, so a partial TOML/JSON document deserialises.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which site to talk to.
    pub site: Site,
    /// Account name used for HTTP basic authentication.
    pub username: Option<String>,
    /// API key paired with `username`.
    pub api_key: Option<String>,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Minimum milliseconds between two requests. `0` disables rate limiting.
    pub rate_limit_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: Site::default(),
            username: None,
            api_key: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("site", &self.site)
            .field("username", &self.username)
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .field("user_agent", &self.user_agent)
            .field("rate_limit_ms", &self.rate_limit_ms)
            .finish()
    }
}

impl Config {
    /// Configuration for `site` with no credentials.
    pub fn new(site: Site) -> Self {
        Self {
            site,
            ..Self::default()
        }
    }

    /// Sets the login used for authenticated endpoints.
    #[must_use]
    pub fn with_credentials<U: Into<String>, K: Into<String>>(mut self, username: U, api_key: K) -> Self {
        self.username = Some(username.into());
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the minimum spacing between requests. `Duration::ZERO` disables it.
    ///
    /// Intervals are stored in whole milliseconds, rounded up, so any
    /// non-zero interval keeps rate limiting on.
    #[must_use]
    pub fn with_rate_limit(mut self, interval: Duration) -> Self {
        let mut millis = interval.as_millis();
        if interval.subsec_nanos() % 1_000_000 != 0 {
            millis += 1;
        }
        self.rate_limit_ms = u64::try_from(millis).unwrap_or(u64::MAX);
        self
    }

    /// Returns the username and key if both are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.api_key) {
            (Some(user), Some(key)) => Some((user.as_str(), key.as_str())),
            _ => None,
        }
    }

    /// The rate limit interval, or `None` if disabled.
    pub fn rate_limit(&self) -> Option<Duration> {
        (self.rate_limit_ms > 0).then(|| Duration::from_millis(self.rate_limit_ms))
    }
}
