use std::fmt;
use thiserror::Error;

/// Main error type for Abiquo API operations
#[derive(Debug, Error)]
pub enum AbiquoError {
    /// Server answered with a decodable error envelope.
    /// Only the first envelope of the error collection is kept.
    #[error("ERROR {code} - {message} (HTTP {status})")]
    Api {
        code: String,
        message: String,
        status: u16,
    },

    /// Server answered with an error status and a body that is not an error envelope
    #[error("ERROR {status}: {body}")]
    Http { status: u16, body: String },

    /// Single resource lookup answered 404
    #[error("NOT FOUND: {url}")]
    NotFound { url: String },

    /// Navigation requested for a relation the entity does not expose
    #[error("link with relation '{rel}' is not present")]
    LinkNotPresent { rel: String },

    /// Login response did not carry the session token header
    #[error("login response is missing the {header} header")]
    MissingToken { header: &'static str },

    /// Named configuration property does not exist
    #[error("Property '{0}' was not found.")]
    PropertyNotFound(String),

    /// The client's deadline passed before the request could be sent
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// The client's cancel token was triggered
    #[error("request cancelled")]
    Cancelled,

    /// Header value could not be built
    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Network or TLS failure, surfaced unchanged
    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AbiquoError {
    /// Create a new opaque HTTP error from a status and a raw body
    pub fn http(status: u16, body: &[u8]) -> Self {
        AbiquoError::Http {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Check if this error is a permission denied error (403)
    pub fn is_permission_denied(&self) -> bool {
        self.status_code() == Some(403)
    }

    /// Check if this error is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, AbiquoError::NotFound { .. }) || self.status_code() == Some(404)
    }

    /// Get the HTTP status code if the server produced this error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AbiquoError::Api { status, .. } | AbiquoError::Http { status, .. } => Some(*status),
            AbiquoError::NotFound { .. } => Some(404),
            AbiquoError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for Abiquo API operations
pub type Result<T> = std::result::Result<T, AbiquoError>;

/// Error returned when draining a paginated collection stops early.
///
/// Items gathered from the pages fetched before the failure are kept in
/// `partial`, in arrival order.
pub struct PaginationError<T> {
    pub partial: Vec<T>,
    pub error: AbiquoError,
}

impl<T> PaginationError<T> {
    pub(crate) fn new(partial: Vec<T>, error: AbiquoError) -> Self {
        PaginationError { partial, error }
    }

    /// Split into the partial items and the underlying error
    pub fn into_parts(self) -> (Vec<T>, AbiquoError) {
        (self.partial, self.error)
    }
}

impl<T> fmt::Debug for PaginationError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginationError")
            .field("partial_len", &self.partial.len())
            .field("error", &self.error)
            .finish()
    }
}

impl<T> fmt::Display for PaginationError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pagination stopped after {} items: {}",
            self.partial.len(),
            self.error
        )
    }
}

impl<T> std::error::Error for PaginationError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<T> From<PaginationError<T>> for AbiquoError {
    fn from(err: PaginationError<T>) -> Self {
        err.error
    }
}
