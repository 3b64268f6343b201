use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;

use crate::enums::HttpMethod;
use crate::map::{Map, Trace};
use crate::message::{Request, Response};
use crate::path;
use crate::types::CallbackFn;
use crate::uri::Uri;

use super::error::RouteResult;

/// Request handler behind handler and handler-factory endpoints.
pub trait RequestHandler: Send + Sync {
    fn handle(&self, request: &Request) -> Response;
}

/// Name-to-instance lookup injected into factory endpoints. The engine only
/// ever calls through this trait; how instances are built is out of scope.
pub trait Container: Send + Sync {
    fn get(&self, id: &str) -> Option<Arc<dyn RequestHandler>>;
    fn has(&self, id: &str) -> bool;
}

/// Terminal routing nodes. Each responds in a single `forward` call and
/// keeps no state between calls.
///
/// Apart from the resource dispatcher, an endpoint only executes once the
/// request path has been fully consumed by the gates above it; a leftover
/// suffix means some deeper route should have claimed the request.
pub enum Endpoint {
    Callback(CallbackFn),
    Handler(Arc<dyn RequestHandler>),
    HandlerFactory {
        id: Box<str>,
        container: Arc<dyn Container>,
    },
    Redirect {
        status: u16,
        target: Arc<dyn Fn() -> Uri + Send + Sync>,
    },
    Resource(ResourceEndpoint),
    Null,
}

impl Endpoint {
    pub(crate) fn forward(&self, request: &Request, prototype: &Response) -> Option<Response> {
        let path_consumed = request.remaining_path().is_empty();
        match self {
            Endpoint::Callback(callback) if path_consumed => Some(callback(request)),
            Endpoint::Handler(handler) if path_consumed => Some(handler.handle(request)),
            Endpoint::HandlerFactory { id, container } if path_consumed => {
                match container.get(id) {
                    Some(handler) => Some(handler.handle(request)),
                    None => {
                        tracing::error!(id = %id, "request handler missing from container");
                        None
                    }
                }
            }
            Endpoint::Redirect { status, target } if path_consumed => Some(
                prototype
                    .clone()
                    .with_status(*status)
                    .with_header("Location", &target().to_string()),
            ),
            Endpoint::Resource(resource) => resource.forward(request),
            _ => None,
        }
    }

    pub(crate) fn trace(&self, trace: &Trace, map: &mut Map) -> RouteResult<()> {
        match self {
            Endpoint::Resource(resource) => resource.trace(trace, map),
            _ => {
                trace.endpoint(map);
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Callback(_) => f.write_str("Callback"),
            Endpoint::Handler(_) => f.write_str("Handler"),
            Endpoint::HandlerFactory { id, .. } => write!(f, "HandlerFactory({id})"),
            Endpoint::Redirect { status, .. } => write!(f, "Redirect({status})"),
            Endpoint::Resource(resource) => resource.fmt(f),
            Endpoint::Null => f.write_str("Null"),
        }
    }
}

/// CRUD actions dispatched by [`ResourceEndpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceAction {
    Index,
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl ResourceAction {
    pub const ALL: [ResourceAction; 6] = [
        ResourceAction::Index,
        ResourceAction::Get,
        ResourceAction::Post,
        ResourceAction::Put,
        ResourceAction::Patch,
        ResourceAction::Delete,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ResourceAction::Index => "index",
            ResourceAction::Get => "get",
            ResourceAction::Post => "post",
            ResourceAction::Put => "put",
            ResourceAction::Patch => "patch",
            ResourceAction::Delete => "delete",
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            ResourceAction::Index | ResourceAction::Get => HttpMethod::Get,
            ResourceAction::Post => HttpMethod::Post,
            ResourceAction::Put => HttpMethod::Put,
            ResourceAction::Patch => HttpMethod::Patch,
            ResourceAction::Delete => HttpMethod::Delete,
        }
    }

    /// Item actions address one resource instance and require a valid id.
    pub fn is_item(&self) -> bool {
        matches!(
            self,
            ResourceAction::Get
                | ResourceAction::Put
                | ResourceAction::Patch
                | ResourceAction::Delete
        )
    }
}

/// Dispatches by HTTP method and presence of a numeric id segment to the
/// registered CRUD handlers. An item request with a missing or malformed id
/// is "not handled" rather than an error, and so is any unregistered action.
pub struct ResourceEndpoint {
    handlers: HashMap<ResourceAction, CallbackFn>,
}

impl ResourceEndpoint {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn on(
        mut self,
        action: ResourceAction,
        handler: impl Fn(&Request) -> Response + Send + Sync + 'static,
    ) -> Self {
        self.handlers.insert(action, Arc::new(handler));
        self
    }

    pub(crate) fn forward(&self, request: &Request) -> Option<Response> {
        let (action, id) = self.dispatch(request)?;
        let handler = self.handlers.get(&action)?;
        match id {
            Some(id) => Some(handler(&request.clone().with_attribute("id", id))),
            None => Some(handler(request)),
        }
    }

    pub(crate) fn trace(&self, trace: &Trace, map: &mut Map) -> RouteResult<()> {
        for action in ResourceAction::ALL {
            if !self.handlers.contains_key(&action) {
                continue;
            }
            let branch = trace
                .next_hop(action.label())?
                .with_method(action.method().into());
            let branch = if action.is_item() {
                branch.with_template_segment("{id}")?
            } else {
                branch
            };
            branch.endpoint(map);
        }
        Ok(())
    }

    fn dispatch<'a>(&self, request: &'a Request) -> Option<(ResourceAction, Option<&'a str>)> {
        let remaining = request.remaining_path();
        match request.method() {
            HttpMethod::Get if remaining.is_empty() => Some((ResourceAction::Index, None)),
            HttpMethod::Get => valid_id(remaining).map(|id| (ResourceAction::Get, Some(id))),
            HttpMethod::Post if remaining.is_empty() => Some((ResourceAction::Post, None)),
            HttpMethod::Put => valid_id(remaining).map(|id| (ResourceAction::Put, Some(id))),
            HttpMethod::Patch => valid_id(remaining).map(|id| (ResourceAction::Patch, Some(id))),
            HttpMethod::Delete => valid_id(remaining).map(|id| (ResourceAction::Delete, Some(id))),
            _ => None,
        }
    }
}

impl Default for ResourceEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ResourceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut actions: Vec<&str> = self.handlers.keys().map(ResourceAction::label).collect();
        actions.sort_unstable();
        f.debug_struct("ResourceEndpoint")
            .field("actions", &actions)
            .finish()
    }
}

/// A valid id is a single terminal segment matching `[1-9][0-9]*`.
fn valid_id(remaining: &str) -> Option<&str> {
    let (segment, rest) = path::split_segment(remaining);
    if !rest.is_empty() || segment.is_empty() {
        return None;
    }
    let bytes = segment.as_bytes();
    if !(b'1'..=b'9').contains(&bytes[0]) || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: HttpMethod, remaining: &str) -> Request {
        Request::new(method, Uri::parse("/res").unwrap()).with_remaining_path(remaining)
    }

    fn endpoint_with_index() -> ResourceEndpoint {
        ResourceEndpoint::new().on(ResourceAction::Index, |_| Response::new(200))
    }

    #[test]
    fn get_without_id_hits_index() {
        let endpoint = endpoint_with_index();
        let response = endpoint.forward(&request(HttpMethod::Get, "")).unwrap();
        assert_eq!(response.status(), 200);
    }

    #[test]
    fn unregistered_action_with_valid_id_is_not_handled() {
        let endpoint = endpoint_with_index();
        assert!(endpoint.forward(&request(HttpMethod::Delete, "7523")).is_none());
    }

    #[test]
    fn invalid_id_on_item_method_is_not_handled() {
        let endpoint = ResourceEndpoint::new()
            .on(ResourceAction::Get, |_| Response::new(200))
            .on(ResourceAction::Delete, |_| Response::new(204));
        assert!(endpoint.forward(&request(HttpMethod::Delete, "0523")).is_none());
        assert!(endpoint.forward(&request(HttpMethod::Delete, "abc")).is_none());
        assert!(endpoint.forward(&request(HttpMethod::Get, "7/extra")).is_none());
    }

    #[test]
    fn item_handler_receives_id_attribute() {
        let endpoint = ResourceEndpoint::new().on(ResourceAction::Get, |request| {
            Response::new(200).with_body(request.attribute("id").unwrap_or(""))
        });
        let response = endpoint.forward(&request(HttpMethod::Get, "7523")).unwrap();
        assert_eq!(response.body(), "7523");
    }
}
