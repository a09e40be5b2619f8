//! Query parsing.

use percent_encoding::percent_decode_str;
use url::Url;

use crate::lookup::types::{LookupError, LookupResult};

/// A parsed route query: the hostname and path to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuery {
    raw: String,
    hostname: String,
    path: String,
}

impl RouteQuery {
    /// Parse a URL such as `https://api.example.com/v1`.
    ///
    /// The scheme is mandatory. A port is accepted and ignored. The path is
    /// percent-decoded, since route paths are stored decoded. A bare `/` path
    /// is treated as no path, since routes never carry `/` as their path.
    pub fn parse(raw: &str) -> LookupResult<Self> {
        let malformed = |reason: String| LookupError::MalformedQuery {
            query: raw.to_string(),
            reason,
        };

        let url = Url::parse(raw.trim()).map_err(|e| malformed(e.to_string()))?;
        if url.scheme().is_empty() {
            return Err(malformed("missing scheme".into()));
        }
        let hostname = match url.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(malformed("missing host".into())),
        };

        let path = percent_decode_str(url.path())
            .decode_utf8()
            .map_err(|e| malformed(format!("path is not valid UTF-8: {e}")))?;
        let path = match path.as_ref() {
            "/" => String::new(),
            p => p.to_string(),
        };

        Ok(Self {
            raw: raw.to_string(),
            hostname,
            path,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}
