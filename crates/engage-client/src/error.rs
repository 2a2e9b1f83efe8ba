//! Error types shared across the Engage API crates.

/// Result type alias for Engage client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Engage client operations.
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

    /// Returns true if this error came from the network layer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Timeout | ErrorKind::Connection(_) | ErrorKind::Http { .. }
        )
    }

    /// Returns true if the server itself reported this error (hard fault
    /// or per-row failures).
    pub fn is_server_reported(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::ServerFault(_) | ErrorKind::PartialFailure(_)
        )
    }

    /// Returns true if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Authentication(_))
    }
}

/// The kind of error that occurred.
///
/// Display strings carry the bare detail message; the taxonomy name comes
/// from [`ErrorKind::label`], so callers can compose a `<Kind>: <message>`
/// line without duplication.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Invalid client configuration.
    #[error("{0}")]
    Config(String),

    /// Malformed caller input to a request builder.
    #[error("{0}")]
    InvalidParameter(String),

    /// A bulk data row whose cardinality does not match the header.
    #[error("row {row} has {found} column(s), header has {expected}")]
    RowShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Login exchange completed but yielded no usable session token.
    #[error("{0}")]
    Authentication(String),

    /// Request timeout.
    #[error("request timed out")]
    Timeout,

    /// Connection error.
    #[error("{0}")]
    Connection(String),

    /// Non-success HTTP status from the endpoint.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Response violates the protocol contract.
    #[error("{0}")]
    MalformedResponse(String),

    /// Hard fault reported by the server; carries the vendor message.
    #[error("{0}")]
    ServerFault(String),

    /// Rows reported individually failed despite overall success.
    #[error("{}", render_failures(.0))]
    PartialFailure(Vec<String>),

    /// Operation name the dispatcher does not recognize.
    #[error("unrecognized operation {0:?}")]
    UnsupportedOperation(String),
}

impl ErrorKind {
    /// Taxonomy label for this kind, as presented by the CLI.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Config(_) => "ConfigError",
            ErrorKind::InvalidParameter(_) => "InvalidParameterError",
            ErrorKind::RowShape { .. } => "RowShapeError",
            ErrorKind::Authentication(_) => "AuthenticationError",
            ErrorKind::Timeout | ErrorKind::Connection(_) | ErrorKind::Http { .. } => {
                "TransportError"
            }
            ErrorKind::MalformedResponse(_) => "MalformedResponseError",
            ErrorKind::ServerFault(_) | ErrorKind::PartialFailure(_) => "ApiError",
            ErrorKind::UnsupportedOperation(_) => "UnsupportedOperationError",
        }
    }
}

/// Join failure descriptions 1-indexed, separated by `"; "`.
fn render_failures(failures: &[String]) -> String {
    failures
        .iter()
        .enumerate()
        .map(|(i, description)| format!("{}. {}", i + 1, description))
        .collect::<Vec<_>>()
        .join("; ")
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
            ErrorKind::Connection(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("invalid URL: {}", err)), err)
    }
}
