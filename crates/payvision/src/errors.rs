use serde::Deserialize;

pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// One element of the JSON array the gateway sends along with an HTTP 400.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default, alias = "error_code")]
    pub code: Option<String>,
    #[serde(default, alias = "error", alias = "description")]
    pub message: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PayVisionError {
    #[error("Resource not found: {}", body_or_empty(.message))]
    NotFound { message: Option<String> },
    #[error("Bad request: {}", body_or_empty(.message))]
    BadRequest {
        message: Option<String>,
        errors: Vec<FieldError>,
    },
    #[error("Forbidden: {}", body_or_empty(.message))]
    Forbidden { message: Option<String> },
    #[error("Gateway responded with HTTP {status_code}: {}", body_or_empty(.message))]
    Gateway {
        status_code: u16,
        message: Option<String>,
    },
    #[error("Failed to reach the gateway: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Failed to encode the request body")]
    RequestEncodingFailed,
    #[error("Failed to deserialize the gateway response")]
    ResponseDeserializationFailed,
    #[error("Failed to build the HTTP client")]
    ClientBuildFailed,
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

fn body_or_empty(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or("<no body>")
}

impl PayVisionError {
    /// Classifies a non-2xx reply by its HTTP status. The body is carried as the message; for
    /// HTTP 400 it is additionally read as a JSON array of field errors.
    pub fn from_http_status(status_code: u16, body: Option<String>) -> Self {
        match status_code {
            404 => Self::NotFound { message: body },
            400 => {
                let errors = body
                    .as_deref()
                    .map(|body| {
                        serde_json::from_str::<Vec<FieldError>>(body).unwrap_or_else(|error| {
                            crate::logger::warn!(%error, "HTTP 400 body is not a list of field errors");
                            Vec::new()
                        })
                    })
                    .unwrap_or_default();
                Self::BadRequest {
                    message: body,
                    errors,
                }
            }
            403 => Self::Forbidden { message: body },
            status_code => Self::Gateway {
                status_code,
                message: body,
            },
        }
    }

    /// HTTP status behind this error, when the gateway answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::BadRequest { .. } => Some(400),
            Self::Forbidden { .. } => Some(403),
            Self::Gateway { status_code, .. } => Some(*status_code),
            Self::Transport(error) => error.status().map(|status| status.as_u16()),
            Self::RequestEncodingFailed
            | Self::ResponseDeserializationFailed
            | Self::ClientBuildFailed
            | Self::InvalidConfiguration(_) => None,
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::BadRequest { errors, .. } => errors,
            _ => &[],
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code()
            .map_or(false, |status| (400..500).contains(&status))
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().map_or(false, |status| status >= 500)
    }
}
