use smallvec::SmallVec;

use crate::enums::MethodSet;
use crate::path;
use crate::pattern::Pattern;
use crate::uri::Uri;

use super::error::{TraceError, TraceResult};
use super::{Map, MapEntry};

/// Immutable accumulator for one branch of the routing-map walk.
///
/// Every step returns a fresh value, so sibling branches of the tree never
/// observe each other's accumulated state.
#[derive(Debug, Clone)]
pub struct Trace {
    path: String,
    methods: Option<MethodSet>,
    uri: Uri,
    excluded: SmallVec<[Box<str>; 4]>,
    path_locked: bool,
}

impl Trace {
    pub fn new(prototype: Uri) -> Self {
        Self {
            path: String::new(),
            methods: None,
            uri: prototype,
            excluded: SmallVec::new(),
            path_locked: false,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Extends the dotted path name with the next hop label.
    ///
    /// Exclusions are inherited down the branch so a lazily resolved
    /// self-reference re-entering an excluded label fails fast instead of
    /// recursing forever.
    pub fn next_hop(&self, label: &str) -> TraceResult<Trace> {
        if self.excluded.iter().any(|hop| hop.as_ref() == label) {
            return Err(TraceError::LabelConflict {
                label: label.to_string(),
                path: self.path.clone(),
            });
        }
        let mut next = self.clone();
        next.path = path::join_hops(&self.path, label);
        Ok(next)
    }

    /// Narrows the active method set; an empty intersection makes the
    /// branch produce no map entries.
    pub fn with_method(&self, methods: MethodSet) -> Trace {
        let mut next = self.clone();
        next.methods = Some(match self.methods {
            Some(current) => current & methods,
            None => methods,
        });
        next
    }

    /// Folds a pattern's template URI into the accumulated template.
    pub fn with_pattern(&self, pattern: &Pattern) -> TraceResult<Trace> {
        let folded = pattern
            .template(self.uri.clone())
            .map_err(|source| TraceError::Template {
                path: self.path.clone(),
                source,
            })?;
        self.replaced_uri(folded)
    }

    /// Appends a raw template segment such as `{id}`.
    pub fn with_template_segment(&self, segment: &str) -> TraceResult<Trace> {
        let folded = self.uri.clone().with_appended_segment(segment);
        self.replaced_uri(folded)
    }

    pub fn with_excluded_hops<I, S>(&self, labels: I) -> Trace
    where
        I: IntoIterator<Item = S>,
        S: Into<Box<str>>,
    {
        let mut next = self.clone();
        next.excluded.extend(labels.into_iter().map(Into::into));
        next
    }

    /// After locking, any pattern that would alter the accumulated URI path
    /// makes the branch fail with an unreachable-endpoint error.
    pub fn with_locked_uri_path(&self) -> Trace {
        let mut next = self.clone();
        next.path_locked = true;
        next
    }

    /// Records one map entry per active method, or a wildcard entry when no
    /// method constraint applies on this branch.
    pub fn endpoint(&self, map: &mut Map) {
        let uri = self.uri.to_string();
        match self.methods {
            None => map.push(MapEntry {
                name: self.path.clone(),
                method: "*".to_string(),
                uri,
            }),
            Some(set) => {
                for method in set.methods() {
                    map.push(MapEntry {
                        name: self.path.clone(),
                        method: method.label().to_string(),
                        uri: uri.clone(),
                    });
                }
            }
        }
    }

    fn replaced_uri(&self, folded: Uri) -> TraceResult<Trace> {
        if self.path_locked && folded.path() != self.uri.path() {
            return Err(TraceError::LockedUriPath {
                path: self.path.clone(),
                locked: self.uri.path().to_string(),
            });
        }
        let mut next = self.clone();
        next.uri = folded;
        Ok(next)
    }
}
