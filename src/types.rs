use std::sync::Arc;

use crate::message::{Request, Response};

/// Named parameters supplied to `uri()` calls.
pub type UriParams = hashbrown::HashMap<String, String>;

/// Request attributes published by matched patterns.
pub type AttributeMap = hashbrown::HashMap<String, String>;

pub type CallbackFn = Arc<dyn Fn(&Request) -> Response + Send + Sync>;
