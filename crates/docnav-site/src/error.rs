//! Configuration errors and resolution warnings.

use serde::Serialize;

/// Malformed or ambiguous site configuration, or a malformed route.
///
/// Fatal: a site must not be served with a configuration that produces one
/// of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// A required text field is empty.
    #[error("{field} cannot be empty")]
    EmptyField {
        /// Field description (e.g. "site title", "link text in sidebar /api/").
        field: String,
    },
    /// Base path does not start and end with `/`.
    #[error("base path must start and end with '/': {0:?}")]
    InvalidBase(String),
    /// Scope prefix is empty or relative.
    #[error("invalid sidebar scope {scope:?}: {reason}")]
    InvalidScope { scope: String, reason: &'static str },
    /// The same scope is declared more than once.
    #[error("sidebar scope {0:?} is declared more than once")]
    DuplicateScope(String),
    /// A scope without any sections.
    #[error("sidebar scope {0:?} has no sections")]
    EmptyScope(String),
    /// Link is neither an absolute URL nor a site path.
    #[error("invalid link {link:?} in {context}: must be an absolute URL or start with '/'")]
    InvalidLink { link: String, context: String },
    /// Two sidebar entries in one scope point at the same page.
    #[error("duplicate link {link:?} in sidebar scope {scope:?} (section {section:?})")]
    DuplicateLink {
        scope: String,
        section: String,
        link: String,
    },
    /// Route is empty or does not start with `/`.
    #[error("invalid route {route:?}: {reason}")]
    InvalidRoute { route: String, reason: &'static str },
    /// URL path does not live under the configured base.
    #[error("path {path:?} is outside the site base {base:?}")]
    OutsideBase { path: String, base: String },
    /// More than one sidebar entry matched a route.
    #[error("route {route:?} activates more than one sidebar entry: {}", .links.join(", "))]
    AmbiguousActive { route: String, links: Vec<String> },
}

/// Non-fatal resolution outcome. The page still renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ResolutionWarning {
    /// No sidebar scope covers the route.
    #[error("no sidebar scope matches {route}")]
    NoScope { route: String },
    /// No top navigation entry covers the route.
    #[error("no top navigation entry matches {route}")]
    NoTopNav { route: String },
    /// A scope matched but none of its entries is the route.
    #[error("no entry in sidebar scope {scope} matches {route}")]
    NoActiveEntry { route: String, scope: String },
}
