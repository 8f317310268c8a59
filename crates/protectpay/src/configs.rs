use std::time::Duration;

use error_stack::ResultExt;
use masking::Secret;
use serde::Deserialize;
use url::Url;

use crate::errors::{CustomResult, ProtectPayError};

pub const PRODUCTION_ENDPOINT: &str = "https://protectpay.propay.com/API/SPS.svc";
pub const TESTING_ENDPOINT: &str = "https://xmltestapi.propay.com/protectpay/sps.svc";
pub const DEFAULT_TIMEOUT_MS: u64 = 120_000;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    Production,
    #[default]
    Testing,
}

impl Environment {
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_ENDPOINT,
            Self::Testing => TESTING_ENDPOINT,
        }
    }
}

/// Credentials issued by ProPay plus the endpoint to call.
///
/// Loadable from `PROTECTPAY_AUTHENTICATION_TOKEN`, `PROTECTPAY_BILLER_ACCOUNT_ID`,
/// `PROTECTPAY_ENVIRONMENT` and optionally `PROTECTPAY_ENDPOINT`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProtectPayConfig {
    pub authentication_token: Secret<String>,
    pub biller_account_id: String,
    #[serde(default)]
    pub environment: Environment,
    /// Overrides the endpoint of `environment`.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Connect and read timeout in milliseconds, `PROTECTPAY_TIMEOUT_MS`.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl ProtectPayConfig {
    pub fn new(
        authentication_token: impl Into<Secret<String>>,
        biller_account_id: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            authentication_token: authentication_token.into(),
            biller_account_id: biller_account_id.into(),
            environment,
            endpoint: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn from_env() -> CustomResult<Self, ProtectPayError> {
        envy::prefixed("PROTECTPAY_")
            .from_env::<Self>()
            .change_context(ProtectPayError::InvalidConfiguration(
                "PROTECTPAY_* environment variables are missing or malformed",
            ))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn endpoint_url(&self) -> CustomResult<Url, ProtectPayError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .unwrap_or_else(|| self.environment.endpoint());
        Url::parse(endpoint)
            .change_context(ProtectPayError::InvalidConfiguration("endpoint is not a URL"))
            .attach_printable_lazy(|| format!("endpoint: {endpoint}"))
    }
}
