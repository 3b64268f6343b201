use crate::message::Request;
use crate::uri::{self, Uri};

use super::PatternResult;

/// Query-string constraint, e.g. `page=1&sort&filter=`.
///
/// A key without `=` must be present with any value; `key=` requires the key
/// with an empty value. Matching ignores key order in the actual query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPattern {
    params: Vec<(Box<str>, Option<Box<str>>)>,
}

impl QueryPattern {
    pub fn new(query: &str) -> Self {
        let params = uri::query_pairs(query)
            .into_iter()
            .map(|(key, value)| (key.into(), value.map(Into::into)))
            .collect();
        Self { params }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn matched(&self, request: &Request) -> Option<Request> {
        let actual = uri::query_pairs(request.uri().query().unwrap_or(""));
        for (key, expected) in &self.params {
            let (_, found) = actual.iter().find(|(k, _)| *k == key.as_ref())?;
            if let Some(expected) = expected
                && found.unwrap_or("") != expected.as_ref()
            {
                return None;
            }
        }
        Some(request.clone())
    }

    pub fn uri(&self, prototype: Uri) -> PatternResult<Uri> {
        let mut uri = prototype;
        for (key, value) in &self.params {
            uri = uri.with_query_param(key, value.as_deref())?;
        }
        Ok(uri)
    }
}
