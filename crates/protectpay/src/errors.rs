pub type CustomResult<T, E> = error_stack::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ProtectPayError {
    /// The gateway processed the call and rejected it.
    #[error(
        "ProtectPay result {code} ({}): {}",
        or_empty(.value),
        or_empty(.message)
    )]
    ResultCode {
        code: String,
        value: Option<String>,
        message: Option<String>,
    },
    #[error("SOAP fault with HTTP {status_code}: {}", or_empty(.message))]
    Fault {
        status_code: u16,
        code: Option<String>,
        message: Option<String>,
    },
    #[error("Failed to reach ProtectPay: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Failed to encode the SOAP request")]
    RequestEncodingFailed,
    #[error("Failed to deserialize the SOAP response")]
    ResponseDeserializationFailed,
    #[error("SOAP response carries no request result")]
    MissingRequestResult,
    #[error("SOAP response is missing {0}")]
    MissingField(&'static str),
    #[error("Failed to build the HTTP client")]
    ClientBuildFailed,
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

fn or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

impl ProtectPayError {
    /// Result code reported by the gateway, if the call got that far.
    pub fn result_code(&self) -> Option<&str> {
        match self {
            Self::ResultCode { code, .. } => Some(code),
            _ => None,
        }
    }
}
