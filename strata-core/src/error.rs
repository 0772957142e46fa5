use crate::Error;
use thiserror::Error;

/// Failures detected while compiling a statement, resolving a type or walking a result cursor.
///
/// Every variant is raised before any text reaches the database. They travel inside
/// [`anyhow::Error`], use [`StrataError::kind_of`] to recover the kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrataError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Null argument: {0}")]
    NullArgument(String),

    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    #[error("Missing fields: {0}")]
    MissingFields(String),

    #[error("Empty updatable fields: {0}")]
    EmptyUpdatableFields(String),

    #[error("Empty ordering: {0}")]
    EmptyOrdering(String),

    #[error("Primary field not found: {0}")]
    PrimaryFieldNotFound(String),

    #[error("Invalid qualifiers: {0}")]
    InvalidQualifiers(String),

    #[error("Argument `{name}` is out of range: {message}")]
    ArgumentOutOfRange { name: &'static str, message: String },

    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("No more results: {0}")]
    NoMoreResults(String),

    #[error("Disposed: {0}")]
    Disposed(String),
}

impl StrataError {
    /// The kind carried by `error`, if it originated from this crate.
    pub fn kind_of(error: &Error) -> Option<&StrataError> {
        error.downcast_ref::<StrataError>()
    }

    pub fn invalid_argument(message: impl Into<String>) -> Error {
        StrataError::InvalidArgument(message.into()).into()
    }

    pub fn null_argument(message: impl Into<String>) -> Error {
        StrataError::NullArgument(message.into()).into()
    }

    pub fn unsupported_feature(message: impl Into<String>) -> Error {
        StrataError::UnsupportedFeature(message.into()).into()
    }

    pub fn unsupported_type(message: impl Into<String>) -> Error {
        StrataError::UnsupportedType(message.into()).into()
    }

    pub fn out_of_range(name: &'static str, message: impl Into<String>) -> Error {
        StrataError::ArgumentOutOfRange {
            name,
            message: message.into(),
        }
        .into()
    }
}
