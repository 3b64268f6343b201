mod endpoint;
mod error;
mod gate;
mod lazy;
mod splitter;

pub use endpoint::{Container, Endpoint, RequestHandler, ResourceAction, ResourceEndpoint};
pub use error::{RouteError, RouteResult};
pub use gate::{Gate, Middleware};
pub use lazy::LazyRoute;
pub use splitter::{AttributeSelect, MethodSwitch, RouteScan};

use std::sync::Arc;

use crate::enums::HttpMethod;
use crate::map::{Map, Trace};
use crate::message::{Request, Response};
use crate::pattern::Pattern;
use crate::types::UriParams;
use crate::uri::Uri;

/// One node of the routing tree.
///
/// The variant set is closed and every operation dispatches over it
/// exhaustively: gates wrap a single child, splitters pick among several,
/// endpoints terminate. Children are shared `Arc`s so `select` can hand out
/// sub-trees without cloning the nodes themselves.
#[derive(Debug)]
pub enum Route {
    Endpoint(Endpoint),
    Gate(Gate),
    Switch(MethodSwitch),
    Scan(RouteScan),
    Select(AttributeSelect),
    Lazy(LazyRoute),
}

impl Route {
    /// Matches and dispatches the request. `None` means "unhandled"; the
    /// first `Some` produced by a descendant stops all further evaluation.
    pub fn forward(&self, request: &Request, prototype: &Response) -> Option<Response> {
        match self {
            Route::Endpoint(endpoint) => endpoint.forward(request, prototype),
            Route::Gate(gate) => gate.forward(request, prototype),
            Route::Switch(switch) => switch.forward(request, prototype),
            Route::Scan(scan) => scan.forward(request, prototype),
            Route::Select(select) => select.forward(request, prototype),
            Route::Lazy(lazy) => lazy.resolved().forward(request, prototype),
        }
    }

    /// Resolves a dotted route name to the addressed sub-route without
    /// executing it. Splitters consume one leading label each; pattern and
    /// path-end gates re-wrap the result so its URI constraints survive
    /// detachment, while middleware and forward gates are skipped.
    pub fn select(&self, name: &str) -> RouteResult<Arc<Route>> {
        match self {
            Route::Endpoint(_) => {
                crate::path::parse_name(name)?;
                Err(RouteError::NotFound {
                    name: name.to_string(),
                    at: String::new(),
                })
            }
            Route::Gate(gate) => gate.select(name),
            Route::Switch(switch) => switch.select(name),
            Route::Scan(scan) => scan.select(name),
            Route::Select(select) => select.select(name),
            Route::Lazy(lazy) => lazy.resolved().select(name),
        }
    }

    /// Builds an outbound URI by threading the prototype through every
    /// pattern on this node's spine.
    pub fn uri(&self, prototype: Uri, params: &UriParams) -> RouteResult<Uri> {
        match self {
            Route::Endpoint(_) => Ok(prototype),
            Route::Gate(gate) => gate.uri(prototype, params),
            Route::Switch(_) => Err(RouteError::EndpointCall { at: String::new() }),
            Route::Scan(_) => Err(RouteError::Ambiguous { at: String::new() }),
            Route::Select(select) => select.uri(prototype, params),
            Route::Lazy(lazy) => lazy.resolved().uri(prototype, params),
        }
    }

    /// Walks the sub-tree accumulating map entries; never mutates routes.
    pub fn routes(&self, trace: &Trace, map: &mut Map) -> RouteResult<()> {
        match self {
            Route::Endpoint(endpoint) => endpoint.trace(trace, map),
            Route::Gate(gate) => gate.trace(trace, map),
            Route::Switch(switch) => switch.trace(trace, map),
            Route::Scan(scan) => scan.trace(trace, map),
            Route::Select(select) => select.trace(trace, map),
            Route::Lazy(lazy) => lazy.resolved().routes(trace, map),
        }
    }

    // Node constructors; the external builder collaborator assembles trees
    // out of these.

    pub fn callback(callback: impl Fn(&Request) -> Response + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Route::Endpoint(Endpoint::Callback(Arc::new(callback))))
    }

    pub fn handler(handler: Arc<dyn RequestHandler>) -> Arc<Self> {
        Arc::new(Route::Endpoint(Endpoint::Handler(handler)))
    }

    pub fn handler_factory(id: &str, container: Arc<dyn Container>) -> Arc<Self> {
        Arc::new(Route::Endpoint(Endpoint::HandlerFactory {
            id: id.into(),
            container,
        }))
    }

    pub fn redirect(status: u16, target: impl Fn() -> Uri + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Route::Endpoint(Endpoint::Redirect {
            status,
            target: Arc::new(target),
        }))
    }

    pub fn resource(resource: ResourceEndpoint) -> Arc<Self> {
        Arc::new(Route::Endpoint(Endpoint::Resource(resource)))
    }

    pub fn null() -> Arc<Self> {
        Arc::new(Route::Endpoint(Endpoint::Null))
    }

    pub fn pattern_gate(pattern: Pattern, inner: Arc<Route>) -> Arc<Self> {
        Arc::new(Route::Gate(Gate::Pattern { pattern, inner }))
    }

    pub fn middleware(middleware: Arc<dyn Middleware>, inner: Arc<Route>) -> Arc<Self> {
        Arc::new(Route::Gate(Gate::Middleware { middleware, inner }))
    }

    pub fn path_end(inner: Arc<Route>) -> Arc<Self> {
        Arc::new(Route::Gate(Gate::PathEnd { inner }))
    }

    pub fn forward_gate(inner: Arc<Route>) -> Arc<Self> {
        Arc::new(Route::Gate(Gate::Forward { inner }))
    }

    pub fn lazy(factory: impl Fn() -> Arc<Route> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Route::Lazy(LazyRoute::new(factory)))
    }

    pub fn method_switch(routes: impl IntoIterator<Item = (HttpMethod, Arc<Route>)>) -> Arc<Self> {
        Arc::new(Route::Switch(MethodSwitch::new(routes)))
    }

    pub fn scan<I, S>(routes: I, default: Option<Arc<Route>>) -> Arc<Self>
    where
        I: IntoIterator<Item = (S, Arc<Route>)>,
        S: Into<Box<str>>,
    {
        Arc::new(Route::Scan(RouteScan::new(routes, default)))
    }

    pub fn attribute_select(
        attribute: &str,
        item: (&str, Arc<Route>),
        index: (&str, Arc<Route>),
    ) -> Arc<Self> {
        Arc::new(Route::Select(AttributeSelect::new(attribute, item, index)))
    }
}
