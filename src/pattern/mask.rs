use crate::message::Request;
use crate::path;
use crate::uri::Uri;

use super::query::QueryPattern;
use super::{PatternError, PatternResult};

/// Static URI mask, e.g. `https://example.com:8080/some/path?query=params`.
///
/// Only the components present in the mask constrain matching; each of them
/// is applied on `uri()` with conflict detection. An empty mask matches any
/// request and returns the prototype unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriMask {
    scheme: Option<Box<str>>,
    host: Option<Box<str>>,
    port: Option<u16>,
    absolute_path: bool,
    segments: Option<Box<str>>,
    query: Option<QueryPattern>,
}

impl UriMask {
    pub fn new(mask: &str) -> PatternResult<Self> {
        let parsed = Uri::parse(mask).map_err(|source| PatternError::MalformedMask {
            mask: mask.to_string(),
            source,
        })?;
        let absolute_path = parsed.path().starts_with('/');
        let trimmed = parsed.path().trim_matches('/');
        Ok(Self {
            scheme: parsed.scheme().map(Into::into),
            host: parsed.host().map(Into::into),
            port: parsed.port(),
            absolute_path,
            segments: (!trimmed.is_empty()).then(|| trimmed.into()),
            query: parsed.query().map(QueryPattern::new),
        })
    }

    pub fn matched(&self, request: &Request) -> Option<Request> {
        let uri = request.uri();
        if let Some(scheme) = self.scheme.as_deref()
            && uri.scheme() != Some(scheme)
        {
            return None;
        }
        if let Some(host) = self.host.as_deref()
            && uri.host() != Some(host)
        {
            return None;
        }
        if let Some(port) = self.port
            && uri.port() != Some(port)
        {
            return None;
        }

        let mut matched = request.clone();
        if let Some(segments) = self.segments.as_deref() {
            let rest = if self.absolute_path {
                path::strip_segments(uri.path().trim_start_matches('/'), segments)?
            } else {
                path::strip_segments(matched.remaining_path(), segments)?
            };
            let rest = rest.to_string();
            matched = matched.with_remaining_path(&rest);
        }
        if let Some(query) = &self.query {
            matched = query.matched(&matched)?;
        }
        Some(matched)
    }

    pub fn uri(&self, prototype: Uri) -> PatternResult<Uri> {
        let mut uri = prototype;
        if let Some(scheme) = self.scheme.as_deref() {
            uri = uri.with_scheme(scheme)?;
        }
        if let Some(host) = self.host.as_deref() {
            uri = uri.with_host(host)?;
        }
        if let Some(port) = self.port {
            uri = uri.with_port(port)?;
        }
        if let Some(segments) = self.segments.as_deref() {
            if self.absolute_path {
                uri = uri.with_path(&format!("/{segments}"))?;
            } else {
                for segment in segments.split('/') {
                    uri = uri.with_appended_segment(segment);
                }
            }
        }
        if let Some(query) = &self.query {
            uri = query.uri(uri)?;
        }
        Ok(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::HttpMethod;

    fn request(raw: &str) -> Request {
        Request::new(HttpMethod::Get, Uri::parse(raw).unwrap())
    }

    #[test]
    fn scheme_mask_filters_scheme() {
        let mask = UriMask::new("https:").unwrap();
        assert!(mask.matched(&request("https://example.com")).is_some());
        assert!(mask.matched(&request("http://example.com")).is_none());
    }

    #[test]
    fn empty_mask_matches_and_returns_prototype_unchanged() {
        let mask = UriMask::new("").unwrap();
        assert!(mask.matched(&request("http://example.com/x")).is_some());

        let prototype = Uri::parse("//example.com/some/path?query=params&foo=bar").unwrap();
        assert_eq!(mask.uri(prototype.clone()).unwrap(), prototype);
    }

    #[test]
    fn host_and_port_must_match_exactly() {
        let mask = UriMask::new("//example.com:8080").unwrap();
        assert!(mask.matched(&request("https://example.com:8080/x")).is_some());
        assert!(mask.matched(&request("https://example.com/x")).is_none());
        assert!(mask.matched(&request("https://example.org:8080/x")).is_none());
    }

    #[test]
    fn absolute_path_mask_consumes_from_path_root() {
        let mask = UriMask::new("/some/path").unwrap();
        let matched = mask.matched(&request("/some/path/rest")).unwrap();
        assert_eq!(matched.remaining_path(), "rest");
        assert!(mask.matched(&request("/other/path")).is_none());
    }

    #[test]
    fn relative_path_mask_consumes_remaining_path() {
        let mask = UriMask::new("bar").unwrap();
        let matched = mask
            .matched(&request("/foo/bar").with_remaining_path("bar"))
            .unwrap();
        assert_eq!(matched.remaining_path(), "");
    }

    #[test]
    fn absolute_path_conflicts_with_differing_prototype_path() {
        let mask = UriMask::new("/some/path").unwrap();
        let err = mask.uri(Uri::parse("/other").unwrap()).unwrap_err();
        match err {
            PatternError::Unreachable(_) => {}
            other => panic!("expected Unreachable, got {other:?}"),
        }
    }

    #[test]
    fn builds_all_masked_components() {
        let mask = UriMask::new("https://example.com:8080/some/path?query=params").unwrap();
        let uri = mask.uri(Uri::default()).unwrap();
        assert_eq!(
            uri.to_string(),
            "https://example.com:8080/some/path?query=params"
        );
    }
}
