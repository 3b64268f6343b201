use crate::map::TraceError;
use crate::path::PathError;
use crate::pattern::PatternError;
use thiserror::Error;

/// Errors raised by `select`, `uri` and map tracing. `forward` never fails
/// for an unmatched request; it signals "unhandled" by returning `None`.
///
/// The `at` field accumulates the dotted route position while the error
/// bubbles up, so a failure deep in a sub-tree is diagnosable from the
/// top-level call site.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route '{name}' not found at '{at}'")]
    NotFound { name: String, at: String },
    #[error("endpoint call error: '{at}' is a method switch with no distinct uri")]
    EndpointCall { at: String },
    #[error("ambiguous endpoint: '{at}' scans multiple routes without a single uri target")]
    Ambiguous { at: String },
    #[error("invalid uri params at '{at}': {source}")]
    UriParams {
        at: String,
        #[source]
        source: PatternError,
    },
    #[error(transparent)]
    Name(#[from] PathError),
    #[error(transparent)]
    Trace(#[from] TraceError),
}

pub type RouteResult<T> = Result<T, RouteError>;

impl RouteError {
    pub(crate) fn at_hop(self, label: &str) -> Self {
        match self {
            RouteError::NotFound { name, at } => RouteError::NotFound {
                name,
                at: prepend(label, &at),
            },
            RouteError::EndpointCall { at } => RouteError::EndpointCall {
                at: prepend(label, &at),
            },
            RouteError::Ambiguous { at } => RouteError::Ambiguous {
                at: prepend(label, &at),
            },
            RouteError::UriParams { at, source } => RouteError::UriParams {
                at: prepend(label, &at),
                source,
            },
            other => other,
        }
    }
}

fn prepend(label: &str, at: &str) -> String {
    if at.is_empty() {
        label.to_string()
    } else {
        format!("{label}.{at}")
    }
}
