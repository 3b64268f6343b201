pub mod enums;
pub mod errors;
pub mod map;
mod message;
pub mod path;
pub mod pattern;
pub mod route;
pub mod types;
pub mod uri;

pub use enums::{HttpMethod, MethodSet};
pub use errors::{RouterError, RouterResult};
pub use map::{Map, MapEntry, Trace};
pub use message::{Request, Response};
pub use pattern::Pattern;
pub use route::{
    Container, Endpoint, Gate, LazyRoute, Middleware, RequestHandler, ResourceAction,
    ResourceEndpoint, Route,
};
pub use types::UriParams;
pub use uri::Uri;

use std::sync::Arc;

/// Facade over a finished routing tree.
///
/// The tree is assembled once by an external builder and treated as
/// immutable afterwards; every operation here is a read-only walk, so a
/// router can be shared across threads freely.
#[derive(Debug)]
pub struct Router {
    root: Arc<Route>,
    base_uri: Uri,
}

impl Router {
    pub fn new(root: Arc<Route>) -> Self {
        Self {
            root,
            base_uri: Uri::default(),
        }
    }

    /// Prototype URI that `uri()` and `routes()` build on, typically
    /// carrying the deployment's scheme and host.
    pub fn with_base_uri(root: Arc<Route>, base_uri: Uri) -> Self {
        Self { root, base_uri }
    }

    pub fn root(&self) -> &Arc<Route> {
        &self.root
    }

    /// Forwards the request through the tree; `None` means no endpoint
    /// claimed it and the caller should produce its "not found" response.
    #[tracing::instrument(level = "trace", skip(self, request, prototype), fields(method = %request.method(), path = %request.uri().path()))]
    pub fn handle(&self, request: &Request, prototype: &Response) -> Option<Response> {
        self.root.forward(request, prototype)
    }

    /// Resolves a dotted route name to its sub-route without executing it.
    pub fn select(&self, name: &str) -> RouterResult<Arc<Route>> {
        Ok(self.root.select(name)?)
    }

    /// Detaches the named sub-tree as a standalone router sharing this
    /// router's base URI.
    pub fn route(&self, name: &str) -> RouterResult<Router> {
        Ok(Router {
            root: self.select(name)?,
            base_uri: self.base_uri.clone(),
        })
    }

    /// Builds the outbound URI for a named route from the base URI. Errors
    /// carry the selected name as the leading route position.
    #[tracing::instrument(level = "trace", skip(self, params))]
    pub fn uri(&self, name: &str, params: &UriParams) -> RouterResult<Uri> {
        Ok(self
            .select(name)?
            .uri(self.base_uri.clone(), params)
            .map_err(|err| err.at_hop(name))?)
    }

    /// Rebuilds the reachability map by tracing the whole tree. The map is
    /// computed fresh on every call; tracing never mutates any route.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn routes(&self) -> RouterResult<Map> {
        let mut map = Map::new();
        self.root
            .routes(&Trace::new(self.base_uri.clone()), &mut map)?;
        Ok(map)
    }
}
