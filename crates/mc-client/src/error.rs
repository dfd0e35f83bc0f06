//! Error types shared by every busbar-mc crate.
//!
//! Upstream diagnostic payloads are carried verbatim so operators can see the
//! original token-endpoint, REST, or SOAP message. Credentials and tokens are
//! never placed in an error.

/// Result type alias for busbar-mc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for busbar-mc operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Token endpoint failure.
    pub fn auth(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Auth {
            status,
            message: message.into(),
        })
    }

    /// REST call failure.
    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Api {
            status,
            message: message.into(),
        })
    }

    /// Returns true if the token endpoint rejected the request or was unreachable.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Auth { .. })
    }

    /// Returns true if a REST call failed.
    pub fn is_api_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Api { .. })
    }

    /// Returns true if a SOAP call failed with an upstream response.
    pub fn is_soap_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Soap { .. })
    }

    /// Returns true if the call timed out before a response arrived.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout)
    }

    /// Upstream HTTP status, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Auth { status, .. } | ErrorKind::Api { status, .. } => *status,
            ErrorKind::Soap { status, .. } | ErrorKind::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Token endpoint rejected the grant, was unreachable, or returned no token.
    #[error("Authentication failed{}: {message}", status_suffix(*status))]
    Auth {
        status: Option<u16>,
        message: String,
    },

    /// REST call failed. `message` holds the upstream body when a response arrived.
    #[error("API error{}: {message}", status_suffix(*status))]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// SOAP call returned a non-success status.
    #[error(
        "SOAP error (HTTP {status} {status_text}){}: {body}",
        status_message.as_deref().map(|m| format!(" - {m}")).unwrap_or_default()
    )]
    Soap {
        status: u16,
        status_text: String,
        body: String,
        status_message: Option<String>,
    },

    /// Unusable configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller-supplied request cannot be sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),

    /// HTTP request failed with a status but no further classification.
    #[error("HTTP error: {status} {message}")]
    Http { status: u16, message: String },

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

fn status_suffix(status: Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            ErrorKind::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ErrorKind::Other(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}
