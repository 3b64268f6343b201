use crate::map::TraceError;
use crate::path::PathError;
use crate::pattern::PatternError;
use crate::route::RouteError;
use crate::uri::UriError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error(transparent)]
    Uri(#[from] UriError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error(transparent)]
    Trace(#[from] TraceError),
    #[error(transparent)]
    Path(#[from] PathError),
}

pub type RouterResult<T> = Result<T, RouterError>;
