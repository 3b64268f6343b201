use crate::uri::UriError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("missing required uri parameter '{name}'")]
    MissingParam { name: String },
    #[error("invalid uri parameter '{name}': value '{value}' does not match '{constraint}'")]
    InvalidParam {
        name: String,
        value: String,
        constraint: String,
    },
    #[error("invalid constraint '{constraint}' for parameter '{name}': {source}")]
    ConstraintInvalid {
        name: String,
        constraint: String,
        #[source]
        source: regex::Error,
    },
    #[error("malformed uri mask '{mask}'")]
    MalformedMask {
        mask: String,
        #[source]
        source: UriError,
    },
    #[error("unreachable endpoint: {0}")]
    Unreachable(#[from] UriError),
}

pub type PatternResult<T> = Result<T, PatternError>;
