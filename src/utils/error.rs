use thiserror::Error;

/// Failures talking to the WebUntis JSON-RPC endpoint.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    #[error("{message} (method {method}, code {code})")]
    Rpc {
        method: String,
        code: i64,
        message: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response to {method}: {message}")]
    InvalidResponse { method: String, message: String },
}

impl ProviderError {
    /// Invalid responses are a shape problem on our side of the boundary, everything else
    /// originates upstream.
    pub fn is_upstream(&self) -> bool {
        !matches!(self, ProviderError::InvalidResponse { .. })
    }
}

/// Structural problems in raw timetable data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("packed time {0} is not a valid HHMM value")]
    InvalidPackedTime(i64),

    #[error("time '{0}' is not a valid HH:MM value")]
    InvalidTime(String),

    #[error("packed date {0} is not a valid YYYYMMDD value")]
    InvalidPackedDate(i64),
}

#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("class '{name}' not found")]
    ClassNotFound { name: String },

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("malformed timetable: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// How an error surfaces to HTTP clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Upstream,
    Internal,
}

impl TimetableError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TimetableError::ClassNotFound { .. } => ErrorCategory::NotFound,
            TimetableError::Provider(e) if e.is_upstream() => ErrorCategory::Upstream,
            _ => ErrorCategory::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, TimetableError>;
