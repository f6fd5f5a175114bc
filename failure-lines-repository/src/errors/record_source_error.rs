use thiserror::Error;

/// Errors raised while counting or paging through the record source.
#[derive(Debug, Error)]
pub enum RecordSourceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// A page was requested with a limit of zero.
    #[error("Invalid page: offset={offset}, limit={limit}")]
    InvalidPage { offset: u64, limit: u64 },

    /// A row could not be decoded into a failure line.
    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl RecordSourceError {
    /// Create an invalid page error.
    pub fn invalid_page(offset: u64, limit: u64) -> Self {
        Self::InvalidPage { offset, limit }
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
