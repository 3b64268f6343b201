use crate::pattern::PatternError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("label '{label}' conflicts with an excluded hop at '{path}'")]
    LabelConflict { label: String, path: String },
    #[error("unreachable endpoint at '{path}': uri path '{locked}' is locked and cannot change")]
    LockedUriPath { path: String, locked: String },
    #[error("tracing '{path}' failed: {source}")]
    Template {
        path: String,
        #[source]
        source: PatternError,
    },
}

pub type TraceResult<T> = Result<T, TraceError>;
