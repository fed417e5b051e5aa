//! Route and link normalization.
//!
//! Every comparison between a route and a configured link goes through
//! [`normalize_path`], so `/guide/`, `/guide.md`, `/guide.html` and
//! `/guide/index` all name the same page.

use std::fmt;

use serde::Serialize;

use crate::error::ConfigurationError;

/// A validated, normalized site-relative route.
///
/// Always starts with `/`, never ends with `/` unless it is the root, and
/// carries no query string, fragment or page extension.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Route(String);

impl Route {
    /// Parse and normalize a route.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidRoute` if the route is empty or
    /// does not start with `/`.
    pub fn parse(route: &str) -> Result<Self, ConfigurationError> {
        if route.is_empty() {
            return Err(ConfigurationError::InvalidRoute {
                route: route.to_owned(),
                reason: "route is empty",
            });
        }
        if !route.starts_with('/') {
            return Err(ConfigurationError::InvalidRoute {
                route: route.to_owned(),
                reason: "route must start with '/'",
            });
        }
        Ok(Self(normalize_path(route)))
    }

    /// Normalized route string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `prefix` covers this route on a path-segment boundary.
    ///
    /// `prefix` must already be normalized. The root covers every route.
    #[must_use]
    pub fn has_segment_prefix(&self, prefix: &str) -> bool {
        if prefix == "/" || self.0 == prefix {
            return true;
        }
        self.0
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Whether the literal scope prefix covers this route.
    ///
    /// A scope written with a trailing slash (`/api/`) also covers the
    /// directory route itself (`/api`).
    #[must_use]
    pub fn in_scope(&self, scope: &str) -> bool {
        self.0.starts_with(scope) || scope.strip_suffix('/') == Some(self.0.as_str())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a site path.
///
/// Examples:
/// - `"/guide/"` -> `"/guide"`
/// - `"/guide.md"` -> `"/guide"`
/// - `"/guide/index.html"` -> `"/guide"`
/// - `"/index"` -> `"/"`
/// - `"/api?x=1#top"` -> `"/api"`
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let mut path = &path[..end];

    // Each pass may expose another suffix (`/guide/index.md/`), so run to a fixed point.
    loop {
        let trimmed = path.trim_end_matches('/');
        let stripped = trimmed
            .strip_suffix(".md")
            .or_else(|| trimmed.strip_suffix(".html"))
            .unwrap_or(trimmed);
        let stripped = stripped.strip_suffix("/index").unwrap_or(stripped);
        if stripped.len() == path.len() {
            break;
        }
        path = stripped;
    }

    if path.is_empty() {
        "/".to_owned()
    } else {
        path.to_owned()
    }
}

/// Whether a link points outside the site.
#[must_use]
pub fn is_external(link: &str) -> bool {
    link.contains("://") || link.starts_with("//") || link.starts_with("mailto:")
}

/// Prefix a site-relative link with the base path.
///
/// External links are returned unchanged.
#[must_use]
pub fn resolve_link(base: &str, link: &str) -> String {
    if is_external(link) {
        return link.to_owned();
    }
    let base = base.trim_end_matches('/');
    format!("{base}{link}")
}

/// Strip the base path from a URL path, giving the site-relative route.
///
/// # Errors
///
/// Returns `ConfigurationError::OutsideBase` if `path` is not under `base`.
pub fn strip_base(base: &str, path: &str) -> Result<String, ConfigurationError> {
    let outside = || ConfigurationError::OutsideBase {
        path: path.to_owned(),
        base: base.to_owned(),
    };
    if base == "/" {
        return Ok(path.to_owned());
    }
    let base_dir = base.trim_end_matches('/');
    let rest = path.strip_prefix(base_dir).ok_or_else(outside)?;
    if rest.is_empty() {
        Ok("/".to_owned())
    } else if rest.starts_with('/') {
        Ok(rest.to_owned())
    } else {
        Err(outside())
    }
}
