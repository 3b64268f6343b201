use std::fmt;
use std::sync::{Arc, OnceLock};

use super::Route;

/// Deferred-construction indirection.
///
/// The factory runs at most once, on first use, and the result is cached.
/// This lets a node reference the router's own root (e.g. a redirect back
/// to it) without a construction-order cycle; the factory must not be
/// invoked while the tree is still being assembled.
pub struct LazyRoute {
    factory: Box<dyn Fn() -> Arc<Route> + Send + Sync>,
    resolved: OnceLock<Arc<Route>>,
}

impl LazyRoute {
    pub fn new(factory: impl Fn() -> Arc<Route> + Send + Sync + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            resolved: OnceLock::new(),
        }
    }

    pub(crate) fn resolved(&self) -> &Arc<Route> {
        self.resolved.get_or_init(|| (self.factory)())
    }
}

impl fmt::Debug for LazyRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyRoute")
            .field("resolved", &self.resolved.get().is_some())
            .finish()
    }
}
