mod error;

pub use error::{UriError, UriResult};

use memchr::memchr;

/// Structured URI value shared by requests, patterns and the routing map.
///
/// Components are applied through checked setters: a component that is
/// already fixed to a different value fails with
/// [`UriError::ComponentConflict`] instead of being silently overwritten.
/// Path segments are only ever appended, which cannot conflict.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Uri {
    scheme: Option<Box<str>>,
    host: Option<Box<str>>,
    port: Option<u16>,
    path: String,
    query: Option<String>,
}

impl Uri {
    pub fn parse(input: &str) -> UriResult<Self> {
        let mut uri = Uri::default();
        let mut rest = input;

        if let Some(scheme_end) = scheme_end(rest) {
            uri.scheme = Some(rest[..scheme_end].to_ascii_lowercase().into_boxed_str());
            rest = &rest[scheme_end + 1..];
        }

        if let Some(authority) = rest.strip_prefix("//") {
            let end = authority
                .find(['/', '?'])
                .unwrap_or(authority.len());
            let (host, port) = split_authority(input, &authority[..end])?;
            uri.host = host;
            uri.port = port;
            rest = &authority[end..];
        }

        match memchr(b'?', rest.as_bytes()) {
            Some(idx) => {
                uri.path = rest[..idx].to_string();
                uri.query = Some(rest[idx + 1..].to_string());
            }
            None => uri.path = rest.to_string(),
        }

        Ok(uri)
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn with_scheme(mut self, scheme: &str) -> UriResult<Self> {
        if let Some(current) = self.scheme.as_deref() {
            if current != scheme {
                return Err(UriError::ComponentConflict {
                    component: "scheme",
                    current: current.to_string(),
                    requested: scheme.to_string(),
                });
            }
            return Ok(self);
        }
        self.scheme = Some(scheme.into());
        Ok(self)
    }

    pub fn with_host(mut self, host: &str) -> UriResult<Self> {
        if let Some(current) = self.host.as_deref() {
            if current != host {
                return Err(UriError::ComponentConflict {
                    component: "host",
                    current: current.to_string(),
                    requested: host.to_string(),
                });
            }
            return Ok(self);
        }
        self.host = Some(host.into());
        Ok(self)
    }

    pub fn with_port(mut self, port: u16) -> UriResult<Self> {
        if let Some(current) = self.port {
            if current != port {
                return Err(UriError::ComponentConflict {
                    component: "port",
                    current: current.to_string(),
                    requested: port.to_string(),
                });
            }
            return Ok(self);
        }
        self.port = Some(port);
        Ok(self)
    }

    /// Fixes the whole path. Fails when a different path is already set.
    pub fn with_path(mut self, path: &str) -> UriResult<Self> {
        if !self.path.is_empty() && self.path != path {
            return Err(UriError::ComponentConflict {
                component: "path",
                current: self.path,
                requested: path.to_string(),
            });
        }
        self.path = path.to_string();
        Ok(self)
    }

    pub fn with_appended_segment(mut self, segment: &str) -> Self {
        if !self.path.ends_with('/') {
            self.path.push('/');
        }
        self.path.push_str(segment);
        self
    }

    /// Sets one query key. `None` marks presence without a fixed value and
    /// never conflicts; a fixed value conflicts with a different existing one.
    pub fn with_query_param(mut self, key: &str, value: Option<&str>) -> UriResult<Self> {
        let query = self.query.as_deref().unwrap_or("");
        if let Some((_, existing)) = query_pairs(query).into_iter().find(|(k, _)| *k == key) {
            match value {
                Some(requested) if existing.unwrap_or("") != requested => {
                    return Err(UriError::ComponentConflict {
                        component: "query",
                        current: format!("{key}={}", existing.unwrap_or("")),
                        requested: format!("{key}={requested}"),
                    });
                }
                _ => return Ok(self),
            }
        }

        let mut query = self.query.take().unwrap_or_default();
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(key);
        if let Some(value) = value {
            query.push('=');
            query.push_str(value);
        }
        self.query = Some(query);
        Ok(self)
    }
}

impl std::fmt::Display for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(scheme) = self.scheme.as_deref() {
            write!(f, "{scheme}:")?;
        }
        if let Some(host) = self.host.as_deref() {
            write!(f, "//{host}")?;
            if let Some(port) = self.port {
                write!(f, ":{port}")?;
            }
            if !self.path.is_empty() && !self.path.starts_with('/') {
                write!(f, "/")?;
            }
        }
        write!(f, "{}", self.path)?;
        if let Some(query) = self.query.as_deref() {
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Uri {
    type Err = UriError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Uri::parse(input)
    }
}

/// Splits a raw query string into `(key, value)` pairs; a key without `=`
/// yields `None` for its value, `key=` yields `Some("")`.
pub(crate) fn query_pairs(query: &str) -> Vec<(&str, Option<&str>)> {
    if query.is_empty() {
        return Vec::new();
    }
    query
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| match memchr(b'=', part.as_bytes()) {
            Some(idx) => (&part[..idx], Some(&part[idx + 1..])),
            None => (part, None),
        })
        .collect()
}

fn scheme_end(input: &str) -> Option<usize> {
    let idx = memchr(b':', input.as_bytes())?;
    if idx == 0 {
        return None;
    }
    let candidate = &input[..idx];
    if memchr(b'/', candidate.as_bytes()).is_some() || memchr(b'?', candidate.as_bytes()).is_some()
    {
        return None;
    }
    let mut bytes = candidate.bytes();
    if !bytes.next().is_some_and(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    if !bytes.all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'-' || b == b'.') {
        return None;
    }
    Some(idx)
}

fn split_authority(input: &str, authority: &str) -> UriResult<(Option<Box<str>>, Option<u16>)> {
    if authority.is_empty() {
        return Err(UriError::Malformed {
            input: input.to_string(),
            reason: "empty authority after '//'",
        });
    }
    match memchr(b':', authority.as_bytes()) {
        Some(idx) => {
            let port = authority[idx + 1..]
                .parse::<u16>()
                .map_err(|_| UriError::InvalidPort {
                    input: input.to_string(),
                    port: authority[idx + 1..].to_string(),
                })?;
            Ok((Some(authority[..idx].into()), Some(port)))
        }
        None => Ok((Some(authority.into()), None)),
    }
}
