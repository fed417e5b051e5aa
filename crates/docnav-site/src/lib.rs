//! Navigation resolution for documentation sites.
//!
//! This crate provides:
//! - [`SiteConfig`]: Validated, immutable navigation configuration
//! - [`Site`]: Per-route resolution of top navigation, sidebar and pagination
//! - [`Layout`]: Composable page shells around externally rendered content
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), docnav_site::ConfigurationError> {
//! use docnav_site::{DefaultLayout, NavLink, SidebarSection, Site, SiteConfig};
//!
//! let mut builder = SiteConfig::builder("Docs");
//! builder
//!     .add_nav_link(NavLink::new("Guide", "/guide/intro").with_active_match("/guide/"))
//!     .add_scope(
//!         "/guide/",
//!         vec![SidebarSection::new(
//!             "Guide",
//!             vec![
//!                 NavLink::new("Intro", "/guide/intro"),
//!                 NavLink::new("Setup", "/guide/setup"),
//!             ],
//!         )],
//!     );
//! let site = Site::new(builder.build()?);
//!
//! // Resolve navigation for a route
//! let nav = site.resolve("/guide/intro")?;
//! assert_eq!(nav.pagination.next.map(|link| link.text), Some("Setup".to_owned()));
//!
//! // Render a page body into the default shell
//! let html = site.render("/guide/setup", "<p>Setup</p>", &DefaultLayout)?;
//! assert!(html.contains("aria-current=\"page\""));
//! # Ok(())
//! # }
//! ```

mod error;
mod layout;
mod navigation;
mod route;
mod site;
mod site_config;

pub use error::{ConfigurationError, ResolutionWarning};
pub use layout::{DefaultLayout, ExtendedLayout, Layout, PageView, Slot};
pub use navigation::{
    ActiveLink, ActiveSection, Pagination, ScopedSidebar, flag_active, flatten, position,
    resolve_scope, resolve_top_nav,
};
pub use route::{Route, is_external, normalize_path, resolve_link, strip_base};
pub use site::{BreadcrumbItem, PageEntry, PageNav, Site};
pub use site_config::{
    Footer, HeadTag, NavLink, SidebarConfig, SidebarScope, SidebarSection, SiteConfig,
    SiteConfigBuilder, SocialLink, ThemeOptions,
};
