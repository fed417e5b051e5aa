//! Navigation resolution for a single route.
//!
//! All functions here are pure: they borrow the immutable configuration and
//! a [`Route`], and return fresh values. Nothing is cached or mutated, so
//! they can run concurrently from any number of render tasks.

use serde::Serialize;

use crate::error::ConfigurationError;
use crate::route::{Route, normalize_path};
use crate::site_config::{NavLink, SidebarConfig, SidebarScope, SidebarSection};

/// Sidebar link annotated with its active state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActiveLink {
    pub text: String,
    pub link: String,
    pub active: bool,
}

/// Sidebar section with annotated links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActiveSection {
    pub text: String,
    pub items: Vec<ActiveLink>,
}

impl ActiveSection {
    /// Whether any link in this section is active.
    #[must_use]
    pub fn has_active(&self) -> bool {
        self.items.iter().any(|item| item.active)
    }
}

/// Sidebar tree for the scope matching a route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScopedSidebar {
    /// Matched scope prefix.
    pub scope: String,
    pub sections: Vec<ActiveSection>,
}

/// Previous and next pages around the active sidebar entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<NavLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NavLink>,
}

impl Pagination {
    /// Neighbors of `flat[index]`.
    ///
    /// Returns an empty pagination when `index` is out of range.
    #[must_use]
    pub fn around(flat: &[&NavLink], index: usize) -> Self {
        if index >= flat.len() {
            return Self::default();
        }
        Self {
            prev: index
                .checked_sub(1)
                .and_then(|i| flat.get(i))
                .map(|link| (*link).clone()),
            next: flat.get(index + 1).map(|link| (*link).clone()),
        }
    }
}

/// Select the sidebar scope for a route by longest-prefix match.
///
/// Equal-length matches resolve to the first declared scope. Returns `None`
/// when no scope covers the route; the page then renders without a sidebar.
#[must_use]
pub fn resolve_scope<'a>(route: &Route, sidebar: &'a SidebarConfig) -> Option<&'a SidebarScope> {
    let mut best: Option<&SidebarScope> = None;
    for scope in sidebar.iter() {
        if !route.in_scope(&scope.scope) {
            continue;
        }
        if best.is_none_or(|b| scope.scope.len() > b.scope.len()) {
            best = Some(scope);
        }
    }
    best
}

/// Annotate every sidebar link with whether it is the current route.
///
/// Zero active links is valid (an unlisted page inside the scope).
///
/// # Errors
///
/// Returns `ConfigurationError::AmbiguousActive` if more than one link
/// matches the route.
pub fn flag_active(
    sections: &[SidebarSection],
    route: &Route,
) -> Result<Vec<ActiveSection>, ConfigurationError> {
    let mut active_links = Vec::new();
    let mut flagged = Vec::with_capacity(sections.len());

    for section in sections {
        let mut items = Vec::with_capacity(section.items.len());
        for item in &section.items {
            let active = is_link_active(item, route);
            if active {
                active_links.push(item.link.clone());
            }
            items.push(ActiveLink {
                text: item.text.clone(),
                link: item.link.clone(),
                active,
            });
        }
        flagged.push(ActiveSection {
            text: section.text.clone(),
            items,
        });
    }

    if active_links.len() > 1 {
        return Err(ConfigurationError::AmbiguousActive {
            route: route.as_str().to_owned(),
            links: active_links,
        });
    }

    Ok(flagged)
}

fn is_link_active(link: &NavLink, route: &Route) -> bool {
    !link.is_external() && normalize_path(&link.link) == route.as_str()
}

/// Flatten sections into one ordered list of links.
///
/// Depth-first in declaration order; the order is never changed.
#[must_use]
pub fn flatten(sections: &[SidebarSection]) -> Vec<&NavLink> {
    sections
        .iter()
        .flat_map(|section| section.items.iter())
        .collect()
}

/// Position of the route in a flattened sidebar.
#[must_use]
pub fn position(flat: &[&NavLink], route: &Route) -> Option<usize> {
    flat.iter().position(|link| is_link_active(link, route))
}

/// Select the active top navigation entry by longest-prefix match.
///
/// Matching uses `active_match` when set, otherwise the link itself, and
/// only on path-segment boundaries: `/api` covers `/api/creation` but
/// deliberately not `/apis`, unlike a plain string prefix. External links
/// are never active.
#[must_use]
pub fn resolve_top_nav<'a>(nav: &'a [NavLink], route: &Route) -> Option<&'a NavLink> {
    let mut best: Option<(&NavLink, usize)> = None;
    for link in nav {
        if link.is_external() {
            continue;
        }
        let prefix = normalize_path(link.active_match.as_deref().unwrap_or(&link.link));
        if !route.has_segment_prefix(&prefix) {
            continue;
        }
        if best.is_none_or(|(_, len)| prefix.len() > len) {
            best = Some((link, prefix.len()));
        }
    }
    best.map(|(link, _)| link)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::site_config::SiteConfig;

    fn route(path: &str) -> Route {
        Route::parse(path).unwrap()
    }

    fn sidebar() -> SidebarConfig {
        let mut builder = SiteConfig::builder("Vide");
        builder
            .add_scope(
                "/",
                vec![SidebarSection::new("Home", vec![NavLink::new("Intro", "/intro")])],
            )
            .add_scope(
                "/api/",
                vec![SidebarSection::new(
                    "API",
                    vec![
                        NavLink::new("Reactivity: Core", "/api/reactivity-core"),
                        NavLink::new("Element Creation", "/api/creation"),
                    ],
                )],
            )
            .add_scope(
                "/tut/",
                vec![
                    SidebarSection::new(
                        "Crash Course",
                        vec![
                            NavLink::new("Introduction", "/tut/crash-course/1-introduction"),
                            NavLink::new("Element Creation", "/tut/crash-course/2-creation"),
                        ],
                    ),
                    SidebarSection::new(
                        "Advanced Reactivity",
                        vec![NavLink::new("Nested Scopes", "/tut/advanced/nested-scoping.md")],
                    ),
                ],
            );
        builder.build().unwrap().sidebar().clone()
    }

    fn abc() -> Vec<SidebarSection> {
        vec![
            SidebarSection::new(
                "First",
                vec![NavLink::new("A", "/a"), NavLink::new("B", "/b")],
            ),
            SidebarSection::new("Second", vec![NavLink::new("C", "/c")]),
        ]
    }

    // resolve_scope

    #[test]
    fn test_resolve_scope_longest_prefix_wins() {
        let sidebar = sidebar();

        let scope = resolve_scope(&route("/api/creation"), &sidebar).unwrap();

        assert_eq!(scope.scope, "/api/");
    }

    #[test]
    fn test_resolve_scope_falls_back_to_root() {
        let sidebar = sidebar();

        let scope = resolve_scope(&route("/about"), &sidebar).unwrap();

        assert_eq!(scope.scope, "/");
    }

    #[test]
    fn test_resolve_scope_none_when_unmatched() {
        let mut builder = SiteConfig::builder("Vide");
        builder.add_scope(
            "/api/",
            vec![SidebarSection::new("API", vec![NavLink::new("Core", "/api/core")])],
        );
        let config = builder.build().unwrap();

        assert!(resolve_scope(&route("/tut/intro"), config.sidebar()).is_none());
        assert!(resolve_scope(&route("/apix"), config.sidebar()).is_none());
    }

    #[test]
    fn test_resolve_scope_directory_route() {
        let sidebar = sidebar();

        let scope = resolve_scope(&route("/api/"), &sidebar).unwrap();

        assert_eq!(scope.scope, "/api/");
    }

    #[test]
    fn test_resolve_scope_nested_scopes() {
        let mut builder = SiteConfig::builder("Site");
        builder
            .add_scope(
                "/a/",
                vec![SidebarSection::new("Outer", vec![NavLink::new("X", "/a/x")])],
            )
            .add_scope(
                "/a/b/",
                vec![SidebarSection::new("Inner", vec![NavLink::new("Y", "/a/b/y")])],
            );
        let config = builder.build().unwrap();

        let inner = resolve_scope(&route("/a/b/y"), config.sidebar()).unwrap();
        let outer = resolve_scope(&route("/a/x"), config.sidebar()).unwrap();

        assert_eq!(inner.scope, "/a/b/");
        assert_eq!(outer.scope, "/a/");
    }

    #[test]
    fn test_resolve_scope_never_returns_non_matching() {
        let sidebar = sidebar();
        for path in ["/", "/api", "/api/creation", "/tut/x", "/other", "/apix/y"] {
            let r = route(path);
            if let Some(scope) = resolve_scope(&r, &sidebar) {
                assert!(r.in_scope(&scope.scope), "{path} matched {}", scope.scope);
                for other in sidebar.iter() {
                    if r.in_scope(&other.scope) {
                        assert!(other.scope.len() <= scope.scope.len());
                    }
                }
            }
        }
    }

    // flag_active

    #[test]
    fn test_flag_active_marks_exact_match() {
        let sections = abc();

        let flagged = flag_active(&sections, &route("/b")).unwrap();

        let active: Vec<_> = flagged
            .iter()
            .flat_map(|s| &s.items)
            .filter(|i| i.active)
            .map(|i| i.link.as_str())
            .collect();
        assert_eq!(active, vec!["/b"]);
        assert!(flagged[0].has_active());
        assert!(!flagged[1].has_active());
    }

    #[test]
    fn test_flag_active_preserves_structure() {
        let sections = abc();

        let flagged = flag_active(&sections, &route("/c")).unwrap();

        assert_eq!(flagged.len(), 2);
        assert_eq!(flagged[0].text, "First");
        assert_eq!(flagged[0].items.len(), 2);
        assert_eq!(flagged[1].text, "Second");
        assert_eq!(
            flagged[1].items[0],
            ActiveLink {
                text: "C".to_owned(),
                link: "/c".to_owned(),
                active: true,
            }
        );
    }

    #[test]
    fn test_flag_active_ignores_trailing_slash_and_extension() {
        let sidebar = sidebar();
        let tut = sidebar.get("/tut/").unwrap();

        let nested = route("/tut/advanced/nested-scoping/");

        let flagged = flag_active(&tut.sections, &nested).unwrap();

        assert!(flagged[1].items[0].active);
    }

    #[test]
    fn test_flag_active_index_route_with_trailing_slash() {
        let sections = vec![SidebarSection::new(
            "Guide",
            vec![
                NavLink::new("Overview", "/guide/"),
                NavLink::new("Setup", "/guide/setup"),
            ],
        )];

        let flagged = flag_active(&sections, &route("/guide/index/")).unwrap();

        assert!(flagged[0].items[0].active);
        assert!(!flagged[0].items[1].active);
        assert_eq!(position(&flatten(&sections), &route("/guide/index/")), Some(0));
    }

    #[test]
    fn test_flag_active_zero_matches_is_valid() {
        let sections = abc();

        let flagged = flag_active(&sections, &route("/unlisted")).unwrap();

        assert!(flagged.iter().all(|s| !s.has_active()));
    }

    #[test]
    fn test_flag_active_is_idempotent() {
        let sections = abc();

        let first = flag_active(&sections, &route("/a")).unwrap();
        let second = flag_active(&sections, &route("/a")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_flag_active_reports_ambiguity() {
        // Unvalidated tree with a duplicate link.
        let sections = vec![
            SidebarSection::new("One", vec![NavLink::new("X", "/x")]),
            SidebarSection::new("Two", vec![NavLink::new("X again", "/x/")]),
        ];

        let err = flag_active(&sections, &route("/x")).unwrap_err();

        assert_eq!(
            err,
            ConfigurationError::AmbiguousActive {
                route: "/x".to_owned(),
                links: vec!["/x".to_owned(), "/x/".to_owned()],
            }
        );
    }

    #[test]
    fn test_flag_active_never_marks_external() {
        let sections = vec![SidebarSection::new(
            "Links",
            vec![NavLink::new("Site", "https://example.com/")],
        )];

        let flagged = flag_active(&sections, &route("/")).unwrap();

        assert!(!flagged[0].items[0].active);
    }

    // flatten / pagination

    #[test]
    fn test_flatten_keeps_declaration_order() {
        let sections = abc();

        let flat: Vec<_> = flatten(&sections).iter().map(|l| l.link.as_str()).collect();

        assert_eq!(flat, vec!["/a", "/b", "/c"]);
        let again: Vec<_> = flatten(&sections).iter().map(|l| l.link.as_str()).collect();
        assert_eq!(flat, again);
    }

    #[test]
    fn test_pagination_middle() {
        let sections = abc();
        let flat = flatten(&sections);

        let pagination = Pagination::around(&flat, position(&flat, &route("/b")).unwrap());

        assert_eq!(pagination.prev.unwrap().link, "/a");
        assert_eq!(pagination.next.unwrap().link, "/c");
    }

    #[test]
    fn test_pagination_first_has_no_prev() {
        let sections = abc();
        let flat = flatten(&sections);

        let pagination = Pagination::around(&flat, 0);

        assert!(pagination.prev.is_none());
        assert_eq!(pagination.next.unwrap().link, "/b");
    }

    #[test]
    fn test_pagination_last_has_no_next() {
        let sections = abc();
        let flat = flatten(&sections);

        let pagination = Pagination::around(&flat, 2);

        assert_eq!(pagination.prev.unwrap().link, "/b");
        assert!(pagination.next.is_none());
    }

    #[test]
    fn test_pagination_out_of_range_is_empty() {
        let sections = abc();
        let flat = flatten(&sections);

        assert_eq!(Pagination::around(&flat, 3), Pagination::default());
    }

    #[test]
    fn test_position_not_listed() {
        let sections = abc();
        let flat = flatten(&sections);

        assert!(position(&flat, &route("/d")).is_none());
    }

    // resolve_top_nav

    fn top_nav() -> Vec<NavLink> {
        vec![
            NavLink::new("Home", "/"),
            NavLink::new("Tutorials", "/tut/crash-course/1-introduction")
                .with_active_match("/tut/"),
            NavLink::new("API", "/api/reactivity-core"),
            NavLink::new("GitHub", "https://github.com/centau/vide"),
        ]
    }

    #[test]
    fn test_resolve_top_nav_longest_prefix() {
        let nav = top_nav();

        let active = resolve_top_nav(&nav, &route("/api/reactivity-core")).unwrap();

        assert_eq!(active.text, "API");
    }

    #[test]
    fn test_resolve_top_nav_uses_active_match() {
        let nav = top_nav();

        let active = resolve_top_nav(&nav, &route("/tut/crash-course/5-effect")).unwrap();

        assert_eq!(active.text, "Tutorials");
    }

    #[test]
    fn test_resolve_top_nav_root_matches_everything_else() {
        let nav = top_nav();

        let active = resolve_top_nav(&nav, &route("/api/creation")).unwrap();

        assert_eq!(active.text, "Home");
    }

    #[test]
    fn test_resolve_top_nav_segment_boundary() {
        let nav = vec![NavLink::new("API", "/api")];

        assert!(resolve_top_nav(&nav, &route("/api/creation")).is_some());
        assert!(resolve_top_nav(&nav, &route("/apis")).is_none());
    }

    #[test]
    fn test_resolve_top_nav_never_external() {
        let nav = vec![NavLink::new("GitHub", "https://github.com/centau/vide")];

        for path in ["/", "/github.com/centau/vide", "/https:"] {
            assert!(resolve_top_nav(&nav, &route(path)).is_none());
        }
    }

    #[test]
    fn test_resolve_top_nav_tie_takes_first_declared() {
        let nav = vec![
            NavLink::new("First", "/guide"),
            NavLink::new("Second", "/guide/"),
        ];

        let active = resolve_top_nav(&nav, &route("/guide/setup")).unwrap();

        assert_eq!(active.text, "First");
    }
}
