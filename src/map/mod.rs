mod error;
mod trace;

pub use error::{TraceError, TraceResult};
pub use trace::Trace;

use serde::Serialize;

/// One reachable endpoint: dotted name, HTTP method (or `*`) and the URI
/// template with parameter placeholders retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapEntry {
    pub name: String,
    pub method: String,
    pub uri: String,
}

/// Reachability map rebuilt from scratch on every `routes()` call.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Map {
    entries: Vec<MapEntry>,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    pub fn find(&self, name: &str) -> Option<&MapEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub(crate) fn push(&mut self, entry: MapEntry) {
        self.entries.push(entry);
    }
}
