use thiserror::Error;

#[derive(Debug, Error)]
pub enum UriError {
    #[error(
        "uri {component} is already fixed to '{current}'; cannot overwrite with '{requested}'"
    )]
    ComponentConflict {
        component: &'static str,
        current: String,
        requested: String,
    },
    #[error("malformed uri '{input}': {reason}")]
    Malformed { input: String, reason: &'static str },
    #[error("invalid port '{port}' in uri '{input}'")]
    InvalidPort { input: String, port: String },
}

pub type UriResult<T> = Result<T, UriError>;
