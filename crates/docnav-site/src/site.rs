//! Per-render navigation entry point.
//!
//! [`Site`] wraps a validated [`SiteConfig`] in an `Arc` and answers, for
//! every route, which navigation entries are active. It holds no mutable
//! state: cloning a `Site` is an `Arc` clone, and every method may be called
//! concurrently without locking.
//!
//! # Example
//!
//! ```
//! use docnav_site::{NavLink, SidebarSection, Site, SiteConfig};
//!
//! let mut builder = SiteConfig::builder("Vide");
//! builder
//!     .add_nav_link(NavLink::new("API", "/api/reactivity-core").with_active_match("/api/"))
//!     .add_scope(
//!         "/api/",
//!         vec![SidebarSection::new(
//!             "API",
//!             vec![
//!                 NavLink::new("Reactivity: Core", "/api/reactivity-core"),
//!                 NavLink::new("Element Creation", "/api/creation"),
//!             ],
//!         )],
//!     );
//! let site = Site::new(builder.build()?);
//!
//! let nav = site.resolve("/api/creation")?;
//! assert_eq!(nav.top_nav.unwrap().text, "API");
//! assert_eq!(nav.pagination.prev.unwrap().link, "/api/reactivity-core");
//! # Ok::<(), docnav_site::ConfigurationError>(())
//! ```

use std::sync::Arc;

use serde::Serialize;

use crate::error::{ConfigurationError, ResolutionWarning};
use crate::layout::{Layout, PageView};
use crate::navigation::{
    Pagination, ScopedSidebar, flag_active, flatten, position, resolve_scope, resolve_top_nav,
};
use crate::route::{Route, normalize_path, strip_base};
use crate::site_config::{NavLink, SiteConfig};

/// Default separator between page and site title when no template is set.
const DEFAULT_TITLE_SEPARATOR: &str = " | ";

/// Breadcrumb navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    /// Display title.
    pub title: String,
    /// Link target path (site-relative). `None` for section labels without a page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Navigation resolved for one route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageNav {
    /// Normalized route.
    pub route: Route,
    /// Document title.
    pub title: String,
    /// Active top navigation entry.
    pub top_nav: Option<NavLink>,
    /// Sidebar for the matched scope.
    pub sidebar: Option<ScopedSidebar>,
    pub pagination: Pagination,
    /// Ancestors of the current page, starting with Home.
    pub breadcrumbs: Vec<BreadcrumbItem>,
    /// Non-fatal resolution outcomes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ResolutionWarning>,
}

impl PageNav {
    /// Text of the active sidebar entry, if any.
    #[must_use]
    pub fn active_text(&self) -> Option<&str> {
        self.sidebar
            .iter()
            .flat_map(|sidebar| &sidebar.sections)
            .flat_map(|section| &section.items)
            .find(|item| item.active)
            .map(|item| item.text.as_str())
    }
}

/// A page listed in a sidebar, with its neighbors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageEntry {
    /// Scope the page is listed under.
    pub scope: String,
    /// Normalized page route.
    pub route: String,
    /// Sidebar text.
    pub text: String,
    pub pagination: Pagination,
}

/// Navigation resolver over an immutable site configuration.
#[derive(Clone, Debug)]
pub struct Site {
    config: Arc<SiteConfig>,
}

impl Site {
    /// Create a resolver for a validated configuration.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Create a resolver sharing an existing configuration.
    #[must_use]
    pub fn from_shared(config: Arc<SiteConfig>) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Resolve navigation for a site-relative route (without the base path).
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidRoute` for an empty or relative
    /// route, and `ConfigurationError::AmbiguousActive` if the sidebar lists
    /// the route twice.
    pub fn resolve(&self, route: &str) -> Result<PageNav, ConfigurationError> {
        let route = Route::parse(route)?;
        let mut warnings = Vec::new();

        let top_nav = resolve_top_nav(self.config.nav(), &route).cloned();

        let mut sidebar = None;
        let mut pagination = Pagination::default();
        let mut section_crumb = None;

        if let Some(scope) = resolve_scope(&route, self.config.sidebar()) {
            let sections = flag_active(&scope.sections, &route)?;
            let flat = flatten(&scope.sections);

            if let Some(index) = position(&flat, &route) {
                pagination = Pagination::around(&flat, index);
            } else {
                tracing::debug!(
                    route = %route,
                    scope = %scope.scope,
                    "No sidebar entry matches route"
                );
                warnings.push(ResolutionWarning::NoActiveEntry {
                    route: route.as_str().to_owned(),
                    scope: scope.scope.clone(),
                });
            }

            section_crumb = scope
                .sections
                .iter()
                .zip(&sections)
                .find(|(_, flagged)| flagged.has_active())
                .map(|(section, _)| BreadcrumbItem {
                    title: section.text.clone(),
                    path: section
                        .items
                        .iter()
                        .find(|item| !item.is_external())
                        .map(|item| normalize_path(&item.link))
                        .filter(|path| path != route.as_str()),
                });

            sidebar = Some(ScopedSidebar {
                scope: scope.scope.clone(),
                sections,
            });
        } else {
            warnings.push(ResolutionWarning::NoScope {
                route: route.as_str().to_owned(),
            });
        }

        if top_nav.is_none() {
            warnings.push(ResolutionWarning::NoTopNav {
                route: route.as_str().to_owned(),
            });
            if sidebar.is_none() {
                tracing::warn!(
                    route = %route,
                    "Route matches no sidebar scope or top navigation entry"
                );
            }
        }

        let breadcrumbs = build_breadcrumbs(&route, section_crumb);

        let mut nav = PageNav {
            route,
            title: String::new(),
            top_nav,
            sidebar,
            pagination,
            breadcrumbs,
            warnings,
        };
        nav.title = self.document_title(nav.active_text());
        Ok(nav)
    }

    /// Resolve navigation for a full URL path that includes the base path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::OutsideBase` if the path is not under the
    /// configured base, plus everything [`resolve`](Self::resolve) returns.
    pub fn resolve_url(&self, url_path: &str) -> Result<PageNav, ConfigurationError> {
        let route = Route::parse(url_path)?;
        let relative = strip_base(self.config.base(), route.as_str())?;
        self.resolve(&relative)
    }

    /// Resolve navigation for `route` and render it with `layout`.
    ///
    /// `body` is the page content produced by the external renderer.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`resolve`](Self::resolve).
    pub fn render(
        &self,
        route: &str,
        body: &str,
        layout: &dyn Layout,
    ) -> Result<String, ConfigurationError> {
        let nav = self.resolve(route)?;
        Ok(self.render_nav(&nav, body, layout))
    }

    /// Render a page from navigation already produced by [`Site::resolve`].
    #[must_use]
    pub fn render_nav(&self, nav: &PageNav, body: &str, layout: &dyn Layout) -> String {
        let view = PageView {
            config: &self.config,
            nav,
            body,
        };
        layout.render(&view)
    }

    /// Every internal page listed in the sidebar, scope by scope, in
    /// flattened order.
    #[must_use]
    pub fn pages(&self) -> Vec<PageEntry> {
        let mut pages = Vec::new();
        for scope in self.config.sidebar().iter() {
            let flat = flatten(&scope.sections);
            for (index, link) in flat.iter().enumerate() {
                if link.is_external() {
                    continue;
                }
                pages.push(PageEntry {
                    scope: scope.scope.clone(),
                    route: normalize_path(&link.link),
                    text: link.text.clone(),
                    pagination: Pagination::around(&flat, index),
                });
            }
        }
        pages
    }

    /// Compute the document title for a page.
    ///
    /// With a template, `:title` is replaced by the page title. Without one,
    /// the page title is joined to the site title. Pages without a title use
    /// the site title alone.
    #[must_use]
    pub fn document_title(&self, page_title: Option<&str>) -> String {
        let site_title = self.config.title();
        let Some(page_title) = page_title else {
            return site_title.to_owned();
        };
        match self.config.title_template() {
            Some(template) => template.replace(":title", page_title),
            None => format!("{page_title}{DEFAULT_TITLE_SEPARATOR}{site_title}"),
        }
    }
}

/// Build breadcrumbs: Home, then the section containing the page.
///
/// The current page itself is not included. The root route has none.
fn build_breadcrumbs(route: &Route, section: Option<BreadcrumbItem>) -> Vec<BreadcrumbItem> {
    if route.as_str() == "/" {
        return Vec::new();
    }
    let mut breadcrumbs = vec![BreadcrumbItem {
        title: "Home".to_owned(),
        path: Some("/".to_owned()),
    }];
    breadcrumbs.extend(section);
    breadcrumbs
}
