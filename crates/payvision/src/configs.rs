use std::time::Duration;

use error_stack::ResultExt;
use masking::Secret;
use serde::Deserialize;
use url::Url;

use crate::errors::{CustomResult, PayVisionError};

pub const DEFAULT_TRANSACT_URL: &str = "https://secure.nmi.com/api/transact.php";
pub const DEFAULT_QUERY_URL: &str = "https://secure.nmi.com/api/query.php";
/// Connect and read timeout applied to every call.
pub const DEFAULT_TIMEOUT_MS: u64 = 120_000;

/// Credentials and endpoints of a gateway account.
///
/// Loadable from the environment with [`PayVisionConfig::from_env`], e.g.
/// `PAYVISION_USERNAME`, `PAYVISION_PASSWORD`, `PAYVISION_TRANSACT_URL`.
#[derive(Debug, Clone, Deserialize)]
pub struct PayVisionConfig {
    pub username: String,
    pub password: Secret<String>,
    #[serde(default = "default_transact_url")]
    pub transact_url: String,
    #[serde(default = "default_query_url")]
    pub query_url: String,
    /// Connect and read timeout in milliseconds, `PAYVISION_TIMEOUT_MS`.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_transact_url() -> String {
    DEFAULT_TRANSACT_URL.to_owned()
}

fn default_query_url() -> String {
    DEFAULT_QUERY_URL.to_owned()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl PayVisionConfig {
    pub fn new(username: impl Into<String>, password: impl Into<Secret<String>>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            transact_url: default_transact_url(),
            query_url: default_query_url(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Points the client at another deployment, e.g. a sandbox.
    #[must_use]
    pub fn with_urls(mut self, transact_url: impl Into<String>, query_url: impl Into<String>) -> Self {
        self.transact_url = transact_url.into();
        self.query_url = query_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn from_env() -> CustomResult<Self, PayVisionError> {
        envy::prefixed("PAYVISION_")
            .from_env::<Self>()
            .change_context(PayVisionError::InvalidConfiguration(
                "PAYVISION_* environment variables are missing or malformed",
            ))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub(crate) fn parsed_urls(&self) -> CustomResult<(Url, Url), PayVisionError> {
        let transact = Url::parse(&self.transact_url)
            .change_context(PayVisionError::InvalidConfiguration("transact_url is not a URL"))
            .attach_printable_lazy(|| format!("transact_url: {}", self.transact_url))?;
        let query = Url::parse(&self.query_url)
            .change_context(PayVisionError::InvalidConfiguration("query_url is not a URL"))
            .attach_printable_lazy(|| format!("query_url: {}", self.query_url))?;
        Ok((transact, query))
    }
}
