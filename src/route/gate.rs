use std::fmt;
use std::sync::Arc;

use crate::map::{Map, Trace};
use crate::message::{Request, Response};
use crate::pattern::Pattern;
use crate::types::UriParams;
use crate::uri::Uri;

use super::error::{RouteError, RouteResult};
use super::Route;

/// Cross-cutting hook wrapped around an inner route. `next` executes the
/// inner route's `forward`; the middleware may respond on its own, decorate
/// the inner response, or pass the `None` ("unhandled") outcome through.
pub trait Middleware: Send + Sync {
    fn process(
        &self,
        request: &Request,
        next: &dyn Fn(&Request) -> Option<Response>,
    ) -> Option<Response>;
}

/// Single-child wrappers conditionally delegating to their inner route.
pub enum Gate {
    /// Delegates only when the pattern matches, forwarding the updated
    /// request. `uri()` applies the pattern to the prototype before
    /// delegating inward, so generated paths concatenate outside-in.
    Pattern { pattern: Pattern, inner: Arc<Route> },
    Middleware {
        middleware: Arc<dyn Middleware>,
        inner: Arc<Route>,
    },
    /// Delegates only when no path segments remain. Plain endpoints already
    /// require a fully consumed path, so this gate only adds a constraint
    /// above routes that consume trailing segments themselves, such as
    /// resource endpoints or parameter patterns deeper in the sub-tree.
    PathEnd { inner: Arc<Route> },
    /// Unconditional passthrough.
    Forward { inner: Arc<Route> },
}

impl Gate {
    pub(crate) fn forward(&self, request: &Request, prototype: &Response) -> Option<Response> {
        match self {
            Gate::Pattern { pattern, inner } => pattern
                .matched(request)
                .and_then(|matched| inner.forward(&matched, prototype)),
            Gate::Middleware { middleware, inner } => {
                middleware.process(request, &|request| inner.forward(request, prototype))
            }
            Gate::PathEnd { inner } => {
                if request.remaining_path().is_empty() {
                    inner.forward(request, prototype)
                } else {
                    None
                }
            }
            Gate::Forward { inner } => inner.forward(request, prototype),
        }
    }

    /// Pattern and path-end gates re-wrap the selected sub-route so the
    /// detached tree keeps every URI constraint it was selected through;
    /// `uri()` on the result then rebuilds the same URI the full tree
    /// matches. Middleware and forward gates are transparent to selection.
    pub(crate) fn select(&self, name: &str) -> RouteResult<Arc<Route>> {
        match self {
            Gate::Pattern { pattern, inner } => Ok(Arc::new(Route::Gate(Gate::Pattern {
                pattern: pattern.clone(),
                inner: inner.select(name)?,
            }))),
            Gate::PathEnd { inner } => Ok(Arc::new(Route::Gate(Gate::PathEnd {
                inner: inner.select(name)?,
            }))),
            Gate::Middleware { inner, .. } | Gate::Forward { inner } => inner.select(name),
        }
    }

    pub(crate) fn uri(&self, prototype: Uri, params: &UriParams) -> RouteResult<Uri> {
        match self {
            Gate::Pattern { pattern, inner } => {
                let prototype =
                    pattern
                        .uri(prototype, params)
                        .map_err(|source| RouteError::UriParams {
                            at: String::new(),
                            source,
                        })?;
                inner.uri(prototype, params)
            }
            _ => self.inner().uri(prototype, params),
        }
    }

    pub(crate) fn trace(&self, trace: &Trace, map: &mut Map) -> RouteResult<()> {
        match self {
            Gate::Pattern { pattern, inner } => inner.routes(&trace.with_pattern(pattern)?, map),
            Gate::PathEnd { inner } => inner.routes(&trace.with_locked_uri_path(), map),
            Gate::Middleware { inner, .. } | Gate::Forward { inner } => inner.routes(trace, map),
        }
    }

    fn inner(&self) -> &Arc<Route> {
        match self {
            Gate::Pattern { inner, .. }
            | Gate::Middleware { inner, .. }
            | Gate::PathEnd { inner }
            | Gate::Forward { inner } => inner,
        }
    }
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Pattern { pattern, inner } => f
                .debug_struct("Pattern")
                .field("pattern", pattern)
                .field("inner", inner)
                .finish(),
            Gate::Middleware { inner, .. } => {
                f.debug_struct("Middleware").field("inner", inner).finish()
            }
            Gate::PathEnd { inner } => f.debug_struct("PathEnd").field("inner", inner).finish(),
            Gate::Forward { inner } => f.debug_struct("Forward").field("inner", inner).finish(),
        }
    }
}
