use std::sync::Arc;

use hashbrown::HashMap;

use crate::enums::HttpMethod;
use crate::map::{Map, Trace};
use crate::message::{Request, Response};
use crate::path;
use crate::types::UriParams;
use crate::uri::Uri;

use super::error::{RouteError, RouteResult};
use super::Route;

/// Picks a child route by the request's HTTP method. In dotted route names
/// the method label is the hop, e.g. `GET.home`.
#[derive(Debug)]
pub struct MethodSwitch {
    routes: HashMap<HttpMethod, Arc<Route>>,
}

impl MethodSwitch {
    pub fn new(routes: impl IntoIterator<Item = (HttpMethod, Arc<Route>)>) -> Self {
        Self {
            routes: routes.into_iter().collect(),
        }
    }

    pub(crate) fn forward(&self, request: &Request, prototype: &Response) -> Option<Response> {
        self.routes
            .get(&request.method())
            .and_then(|route| route.forward(request, prototype))
    }

    pub(crate) fn select(&self, name: &str) -> RouteResult<Arc<Route>> {
        let (label, rest) = path::parse_name(name)?;
        let child = HttpMethod::from_label(label)
            .and_then(|method| self.routes.get(&method))
            .ok_or_else(|| RouteError::NotFound {
                name: name.to_string(),
                at: String::new(),
            })?;
        match rest {
            None => Ok(child.clone()),
            Some(rest) => child.select(rest).map_err(|err| err.at_hop(label)),
        }
    }

    pub(crate) fn trace(&self, trace: &Trace, map: &mut Map) -> RouteResult<()> {
        for method in HttpMethod::ALL {
            let Some(child) = self.routes.get(&method) else {
                continue;
            };
            let branch = trace.next_hop(method.label())?.with_method(method.into());
            child
                .routes(&branch, map)
                .map_err(|err| err.at_hop(method.label()))?;
        }
        Ok(())
    }
}

/// Ordered first-match-wins disjunction over named children, with an
/// optional unnamed default tried last. Construction order is significant.
#[derive(Debug)]
pub struct RouteScan {
    routes: Vec<(Box<str>, Arc<Route>)>,
    default: Option<Arc<Route>>,
}

impl RouteScan {
    pub fn new<I, S>(routes: I, default: Option<Arc<Route>>) -> Self
    where
        I: IntoIterator<Item = (S, Arc<Route>)>,
        S: Into<Box<str>>,
    {
        Self {
            routes: routes
                .into_iter()
                .map(|(label, route)| (label.into(), route))
                .collect(),
            default,
        }
    }

    pub(crate) fn forward(&self, request: &Request, prototype: &Response) -> Option<Response> {
        for (_, route) in &self.routes {
            if let Some(response) = route.forward(request, prototype) {
                return Some(response);
            }
        }
        self.default
            .as_ref()
            .and_then(|route| route.forward(request, prototype))
    }

    pub(crate) fn select(&self, name: &str) -> RouteResult<Arc<Route>> {
        let (label, rest) = path::parse_name(name)?;
        let child = self
            .routes
            .iter()
            .find(|(key, _)| key.as_ref() == label)
            .map(|(_, route)| route)
            .ok_or_else(|| RouteError::NotFound {
                name: name.to_string(),
                at: String::new(),
            })?;
        match rest {
            None => Ok(child.clone()),
            Some(rest) => child.select(rest).map_err(|err| err.at_hop(label)),
        }
    }

    pub(crate) fn trace(&self, trace: &Trace, map: &mut Map) -> RouteResult<()> {
        for (label, child) in &self.routes {
            child
                .routes(&trace.next_hop(label)?, map)
                .map_err(|err| err.at_hop(label))?;
        }
        if let Some(default) = &self.default {
            let labels = self.routes.iter().map(|(label, _)| label.clone());
            default.routes(&trace.with_excluded_hops(labels), map)?;
        }
        Ok(())
    }
}

/// Chooses between two labeled children based on a request attribute set by
/// an earlier pattern (e.g. a resource id), without re-matching the URI.
#[derive(Debug)]
pub struct AttributeSelect {
    attribute: Box<str>,
    item_label: Box<str>,
    item: Arc<Route>,
    index_label: Box<str>,
    index: Arc<Route>,
}

impl AttributeSelect {
    pub fn new(
        attribute: &str,
        item: (&str, Arc<Route>),
        index: (&str, Arc<Route>),
    ) -> Self {
        Self {
            attribute: attribute.into(),
            item_label: item.0.into(),
            item: item.1,
            index_label: index.0.into(),
            index: index.1,
        }
    }

    pub(crate) fn forward(&self, request: &Request, prototype: &Response) -> Option<Response> {
        if request.attribute(&self.attribute).is_some() {
            self.item.forward(request, prototype)
        } else {
            self.index.forward(request, prototype)
        }
    }

    pub(crate) fn select(&self, name: &str) -> RouteResult<Arc<Route>> {
        let (label, rest) = path::parse_name(name)?;
        let child = if label == self.item_label.as_ref() {
            &self.item
        } else if label == self.index_label.as_ref() {
            &self.index
        } else {
            return Err(RouteError::NotFound {
                name: name.to_string(),
                at: String::new(),
            });
        };
        match rest {
            None => Ok(child.clone()),
            Some(rest) => child.select(rest).map_err(|err| err.at_hop(label)),
        }
    }

    /// The target is deterministic given the params: the item branch is
    /// used when the selecting attribute is supplied, the index otherwise.
    pub(crate) fn uri(&self, prototype: Uri, params: &UriParams) -> RouteResult<Uri> {
        if params.contains_key(self.attribute.as_ref()) {
            self.item
                .uri(prototype, params)
                .map_err(|err| err.at_hop(&self.item_label))
        } else {
            self.index
                .uri(prototype, params)
                .map_err(|err| err.at_hop(&self.index_label))
        }
    }

    pub(crate) fn trace(&self, trace: &Trace, map: &mut Map) -> RouteResult<()> {
        self.item
            .routes(&trace.next_hop(&self.item_label)?, map)
            .map_err(|err| err.at_hop(&self.item_label))?;
        self.index
            .routes(&trace.next_hop(&self.index_label)?, map)
            .map_err(|err| err.at_hop(&self.index_label))
    }
}
