mod error;
mod mask;
mod path;
mod query;

pub use error::{PatternError, PatternResult};
pub use mask::UriMask;
pub use path::{NAME, NUMBER, PathParameter, SLUG, StaticPath};
pub use query::QueryPattern;

use crate::message::Request;
use crate::types::UriParams;
use crate::uri::Uri;

/// Bidirectional matcher/generator for one URI-shape constraint.
///
/// The variant set is closed: gates dispatch over it exhaustively, and every
/// variant keeps `matched` and `uri` consistent: a value extracted by a
/// match always passes the validation applied when the URI is rebuilt.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Path(StaticPath),
    Param(PathParameter),
    Mask(UriMask),
    Query(QueryPattern),
    Composite(Vec<Pattern>),
}

impl Pattern {
    pub fn path(segments: &str) -> Self {
        Pattern::Path(StaticPath::new(segments))
    }

    pub fn param(name: &str, constraint: &str) -> PatternResult<Self> {
        Ok(Pattern::Param(PathParameter::new(name, constraint)?))
    }

    pub fn param_number(name: &str) -> PatternResult<Self> {
        Self::param(name, NUMBER)
    }

    pub fn param_slug(name: &str) -> PatternResult<Self> {
        Self::param(name, SLUG)
    }

    pub fn param_name(name: &str) -> PatternResult<Self> {
        Self::param(name, NAME)
    }

    pub fn mask(mask: &str) -> PatternResult<Self> {
        Ok(Pattern::Mask(UriMask::new(mask)?))
    }

    pub fn query(query: &str) -> Self {
        Pattern::Query(QueryPattern::new(query))
    }

    pub fn composite(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        Pattern::Composite(patterns.into_iter().collect())
    }

    /// Matches the request against this constraint. `None` means no match;
    /// a match produces a new request with attributes merged in and the
    /// remaining path advanced past the consumed segments.
    #[tracing::instrument(level = "trace", skip(self, request), fields(remaining = %request.remaining_path()))]
    pub fn matched(&self, request: &Request) -> Option<Request> {
        match self {
            Pattern::Path(p) => p.matched(request),
            Pattern::Param(p) => p.matched(request),
            Pattern::Mask(p) => p.matched(request),
            Pattern::Query(p) => p.matched(request),
            Pattern::Composite(patterns) => {
                let mut request = request.clone();
                for pattern in patterns {
                    request = pattern.matched(&request)?;
                }
                Some(request)
            }
        }
    }

    /// Builds a concrete outbound URI on top of the prototype.
    pub fn uri(&self, prototype: Uri, params: &UriParams) -> PatternResult<Uri> {
        match self {
            Pattern::Path(p) => Ok(p.uri(prototype)),
            Pattern::Param(p) => p.uri(prototype, params),
            Pattern::Mask(p) => p.uri(prototype),
            Pattern::Query(p) => p.uri(prototype),
            Pattern::Composite(patterns) => {
                let mut uri = prototype;
                for pattern in patterns {
                    uri = pattern.uri(uri, params)?;
                }
                Ok(uri)
            }
        }
    }

    /// Like [`Pattern::uri`] but parameter placeholders are retained as
    /// `{name}`. Used only while tracing the routing map.
    pub fn template(&self, prototype: Uri) -> PatternResult<Uri> {
        match self {
            Pattern::Path(p) => Ok(p.uri(prototype)),
            Pattern::Param(p) => Ok(p.template(prototype)),
            Pattern::Mask(p) => p.uri(prototype),
            Pattern::Query(p) => p.uri(prototype),
            Pattern::Composite(patterns) => {
                let mut uri = prototype;
                for pattern in patterns {
                    uri = pattern.template(uri)?;
                }
                Ok(uri)
            }
        }
    }
}
