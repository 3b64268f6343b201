use std::sync::Arc;

use regex::Regex;

use crate::message::Request;
use crate::path;
use crate::types::UriParams;
use crate::uri::Uri;

use super::{PatternError, PatternResult};

/// Constraint presets for typed path parameters.
pub const NUMBER: &str = "[1-9][0-9]*";
pub const SLUG: &str = "[a-z0-9-]+";
pub const NAME: &str = "[a-zA-Z0-9]+";

/// Static path segments, e.g. `foo/bar`. Matches and consumes the prefix of
/// the request's remaining path on segment boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPath {
    segments: Box<str>,
}

impl StaticPath {
    pub fn new(segments: &str) -> Self {
        Self {
            segments: segments.trim_matches('/').into(),
        }
    }

    pub fn matched(&self, request: &Request) -> Option<Request> {
        let rest = path::strip_segments(request.remaining_path(), &self.segments)?;
        Some(request.clone().with_remaining_path(rest))
    }

    pub fn uri(&self, prototype: Uri) -> Uri {
        let mut uri = prototype;
        for segment in self.segments.split('/') {
            uri = uri.with_appended_segment(segment);
        }
        uri
    }
}

/// One named path segment validated by a regexp, e.g. `id` with
/// `[1-9][0-9]*`. The same expression gates both matching and `uri()` so
/// the pattern stays bidirectionally consistent.
#[derive(Debug, Clone)]
pub struct PathParameter {
    name: Box<str>,
    constraint: Box<str>,
    regex: Arc<Regex>,
}

impl PathParameter {
    pub fn new(name: &str, constraint: &str) -> PatternResult<Self> {
        let regex = Regex::new(&format!("^(?:{constraint})$")).map_err(|source| {
            PatternError::ConstraintInvalid {
                name: name.to_string(),
                constraint: constraint.to_string(),
                source,
            }
        })?;
        Ok(Self {
            name: name.into(),
            constraint: constraint.into(),
            regex: Arc::new(regex),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matched(&self, request: &Request) -> Option<Request> {
        let (segment, rest) = path::split_segment(request.remaining_path());
        if segment.is_empty() || !self.regex.is_match(segment) {
            return None;
        }
        Some(
            request
                .clone()
                .with_attribute(self.name.as_ref(), segment)
                .with_remaining_path(rest),
        )
    }

    pub fn uri(&self, prototype: Uri, params: &UriParams) -> PatternResult<Uri> {
        let value = params
            .get(self.name.as_ref())
            .ok_or_else(|| PatternError::MissingParam {
                name: self.name.to_string(),
            })?;
        if !self.regex.is_match(value) {
            return Err(PatternError::InvalidParam {
                name: self.name.to_string(),
                value: value.clone(),
                constraint: self.constraint.to_string(),
            });
        }
        Ok(prototype.with_appended_segment(value))
    }

    pub fn template(&self, prototype: Uri) -> Uri {
        prototype.with_appended_segment(&format!("{{{}}}", self.name))
    }
}

impl PartialEq for PathParameter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.constraint == other.constraint
    }
}

impl Eq for PathParameter {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::HttpMethod;

    fn request(path: &str) -> Request {
        Request::new(HttpMethod::Get, Uri::parse(path).unwrap())
    }

    #[test]
    fn static_path_consumes_matched_segments() {
        let pattern = StaticPath::new("foo/bar");
        let matched = pattern.matched(&request("/foo/bar/baz")).unwrap();
        assert_eq!(matched.remaining_path(), "baz");
    }

    #[test]
    fn static_path_rejects_partial_segment() {
        let pattern = StaticPath::new("foo");
        assert!(pattern.matched(&request("/foobar")).is_none());
    }

    #[test]
    fn number_parameter_extracts_id_and_residual_path() {
        let pattern = PathParameter::new("id", NUMBER).unwrap();
        let matched = pattern
            .matched(&request("/7523/some-slug").with_remaining_path("7523/some-slug"))
            .unwrap();
        assert_eq!(matched.attribute("id"), Some("7523"));
        assert_eq!(matched.remaining_path(), "some-slug");
    }

    #[test]
    fn number_parameter_rejects_leading_zero() {
        let pattern = PathParameter::new("id", NUMBER).unwrap();
        assert!(pattern.matched(&request("/0123")).is_none());
    }

    #[test]
    fn uri_appends_validated_value() {
        let pattern = PathParameter::new("id", NUMBER).unwrap();
        let params = UriParams::from_iter([("id".to_string(), "765".to_string())]);
        let uri = pattern.uri(Uri::parse("/foo/bar").unwrap(), &params).unwrap();
        assert_eq!(uri.path(), "/foo/bar/765");
    }

    #[test]
    fn uri_rejects_malformed_value() {
        let pattern = PathParameter::new("id", NUMBER).unwrap();
        let params = UriParams::from_iter([("id".to_string(), "abc".to_string())]);
        match pattern.uri(Uri::default(), &params).unwrap_err() {
            PatternError::InvalidParam { name, value, .. } => {
                assert_eq!(name, "id");
                assert_eq!(value, "abc");
            }
            other => panic!("expected InvalidParam, got {other:?}"),
        }
    }

    #[test]
    fn uri_requires_the_parameter() {
        let pattern = PathParameter::new("id", NUMBER).unwrap();
        match pattern.uri(Uri::default(), &UriParams::new()).unwrap_err() {
            PatternError::MissingParam { name } => assert_eq!(name, "id"),
            other => panic!("expected MissingParam, got {other:?}"),
        }
    }

    #[test]
    fn template_keeps_placeholder() {
        let pattern = PathParameter::new("id", NUMBER).unwrap();
        let uri = pattern.template(Uri::parse("/foo").unwrap());
        assert_eq!(uri.path(), "/foo/{id}");
    }
}
