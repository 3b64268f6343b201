use smallvec::SmallVec;

use crate::enums::HttpMethod;
use crate::types::AttributeMap;
use crate::uri::Uri;

/// Immutable request value entering the routing tree.
///
/// Patterns never mutate a request: a successful match produces a new value
/// with attributes merged in and the remaining (unconsumed) path updated.
#[derive(Debug, Clone)]
pub struct Request {
    method: HttpMethod,
    uri: Uri,
    attributes: AttributeMap,
    remaining: Box<str>,
}

impl Request {
    pub fn new(method: HttpMethod, uri: Uri) -> Self {
        let remaining = uri.path().trim_start_matches('/').into();
        Self {
            method,
            uri,
            attributes: AttributeMap::new(),
            remaining,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// Path suffix not yet consumed by path patterns, without a leading slash.
    pub fn remaining_path(&self) -> &str {
        &self.remaining
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_remaining_path(mut self, remaining: &str) -> Self {
        self.remaining = remaining.into();
        self
    }
}

/// Response value produced by endpoints.
///
/// "Unhandled" is signalled by `forward` returning `None` rather than by a
/// sentinel response instance, so structural equality on this type is safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    headers: SmallVec<[(Box<str>, Box<str>); 4]>,
    body: Box<str>,
}

impl Response {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: SmallVec::new(),
            body: "".into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_ref())
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_derives_remaining_path_from_uri() {
        let request = Request::new(HttpMethod::Get, Uri::parse("/foo/bar").unwrap());
        assert_eq!(request.remaining_path(), "foo/bar");
    }

    #[test]
    fn with_attribute_leaves_original_untouched() {
        let request = Request::new(HttpMethod::Get, Uri::parse("/foo").unwrap());
        let updated = request.clone().with_attribute("id", "7");
        assert_eq!(updated.attribute("id"), Some("7"));
        assert_eq!(request.attribute("id"), None);
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let response = Response::new(301).with_header("Location", "/foo/bar");
        assert_eq!(response.header("location"), Some("/foo/bar"));
    }
}
