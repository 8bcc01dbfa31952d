use thiserror::Error;

/// Main error type for es-fluent operations
///
/// Every variant is raised synchronously at the point of misuse and
/// propagates directly to the caller. There are no retried or partially
/// failed paths: construction and serialization are total over valid
/// inputs and fail fast on invalid ones.
#[derive(Error, Debug)]
pub enum EsFluentError {
    #[error("Unknown filter name: {0}")]
    UnknownFilter(String),

    #[error("Filter name already registered: {0}")]
    DuplicateFilter(String),

    #[error("Invalid regular expression: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0} filters do not support sub-filters")]
    UnsupportedOperation(&'static str),
}

/// Result type alias for es-fluent operations
pub type Result<T> = std::result::Result<T, EsFluentError>;
