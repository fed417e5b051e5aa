//! Page layouts.
//!
//! A [`Layout`] turns resolved navigation plus an externally rendered page
//! body into a complete HTML document. [`DefaultLayout`] is the base shell;
//! [`ExtendedLayout`] decorates any layout with extra fragments, the way a
//! custom theme extends the default one without replacing it.

use std::fmt::Write;

use crate::navigation::{Pagination, ScopedSidebar};
use crate::route::resolve_link;
use crate::site::PageNav;
use crate::site_config::{HeadTag, NavLink, SiteConfig};

/// Everything a layout needs to render one page.
#[derive(Clone, Copy, Debug)]
pub struct PageView<'a> {
    pub config: &'a SiteConfig,
    pub nav: &'a PageNav,
    /// Page body HTML produced by the external renderer. Inserted verbatim.
    pub body: &'a str,
}

/// Renders a page view into HTML.
pub trait Layout: Send + Sync {
    fn render(&self, page: &PageView<'_>) -> String;
}

/// Base HTML shell: head, top navigation, sidebar, body, pagination, footer.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultLayout;

impl Layout for DefaultLayout {
    fn render(&self, page: &PageView<'_>) -> String {
        let config = page.config;
        let base = config.base();
        let mut html = String::with_capacity(4096 + page.body.len());

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{}</title>", escape(&page.nav.title));
        if let Some(description) = config.description() {
            let _ = writeln!(
                html,
                "<meta name=\"description\" content=\"{}\">",
                escape(description)
            );
        }
        for tag in config.head() {
            render_head_tag(&mut html, tag);
        }
        html.push_str("</head>\n<body>\n");

        render_header(&mut html, page);

        if let Some(sidebar) = &page.nav.sidebar {
            render_sidebar(&mut html, sidebar, base);
        }

        html.push_str("<main>\n");
        html.push_str(page.body);
        html.push_str("\n</main>\n");

        render_pagination(&mut html, &page.nav.pagination, base);
        render_footer(&mut html, config);

        html.push_str("</body>\n</html>");
        html
    }
}

/// Named insertion points offered by [`ExtendedLayout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// Before the page body, inside `<main>`.
    BeforeContent,
    /// After the page body, inside `<main>`.
    AfterContent,
}

/// Decorates a base layout with fragments injected around the page body.
///
/// Fragments are inserted in the order they were added. Everything else is
/// delegated to the base layout unchanged.
#[derive(Clone, Debug)]
pub struct ExtendedLayout<L> {
    base: L,
    fragments: Vec<(Slot, String)>,
}

impl<L: Layout> ExtendedLayout<L> {
    pub fn new(base: L) -> Self {
        Self {
            base,
            fragments: Vec::new(),
        }
    }

    /// Add an HTML fragment to a slot.
    #[must_use]
    pub fn with_slot(mut self, slot: Slot, html: impl Into<String>) -> Self {
        self.fragments.push((slot, html.into()));
        self
    }

    fn slot(&self, slot: Slot) -> impl Iterator<Item = &str> {
        self.fragments
            .iter()
            .filter(move |(s, _)| *s == slot)
            .map(|(_, html)| html.as_str())
    }
}

impl<L: Layout> Layout for ExtendedLayout<L> {
    fn render(&self, page: &PageView<'_>) -> String {
        let mut body = String::with_capacity(page.body.len());
        for fragment in self.slot(Slot::BeforeContent) {
            body.push_str(fragment);
            body.push('\n');
        }
        body.push_str(page.body);
        for fragment in self.slot(Slot::AfterContent) {
            body.push('\n');
            body.push_str(fragment);
        }
        self.base.render(&PageView {
            body: &body,
            ..*page
        })
    }
}

/// Elements that never take content or a closing tag in the document head.
const VOID_HEAD_ELEMENTS: &[&str] = &["base", "link", "meta"];

fn render_head_tag(html: &mut String, tag: &HeadTag) {
    let name = escape(&tag.tag);
    let _ = write!(html, "<{name}");
    for (attr, value) in &tag.attrs {
        let _ = write!(html, " {}=\"{}\"", escape(attr), escape(value));
    }
    html.push('>');
    if !VOID_HEAD_ELEMENTS.contains(&tag.tag.to_ascii_lowercase().as_str()) {
        if let Some(content) = &tag.content {
            html.push_str(content);
        }
        let _ = write!(html, "</{name}>");
    }
    html.push('\n');
}

fn render_header(html: &mut String, page: &PageView<'_>) {
    let config = page.config;
    let base = config.base();

    html.push_str("<header>\n");
    let _ = write!(html, "<a class=\"site-title\" href=\"{}\">", escape(base));
    if let Some(logo) = &config.theme().logo {
        let _ = write!(
            html,
            "<img class=\"logo\" src=\"{}\" alt=\"\">",
            escape(&resolve_link(base, logo))
        );
    }
    let _ = writeln!(html, "{}</a>", escape(config.title()));

    if !config.nav().is_empty() {
        html.push_str("<nav class=\"top-nav\">\n");
        for link in config.nav() {
            let active = page.nav.top_nav.as_ref() == Some(link);
            render_link(html, link, base, active);
        }
        html.push_str("</nav>\n");
    }

    let social = &config.theme().social_links;
    if !social.is_empty() {
        html.push_str("<nav class=\"social-links\">\n");
        for link in social {
            let _ = writeln!(
                html,
                "<a href=\"{}\" aria-label=\"{}\" rel=\"noopener\">{}</a>",
                escape(&link.link),
                escape(&link.icon),
                escape(&link.icon),
            );
        }
        html.push_str("</nav>\n");
    }
    html.push_str("</header>\n");
}

fn render_sidebar(html: &mut String, sidebar: &ScopedSidebar, base: &str) {
    html.push_str("<aside class=\"sidebar\">\n");
    for section in &sidebar.sections {
        html.push_str("<section>\n");
        let _ = writeln!(html, "<h2>{}</h2>", escape(&section.text));
        html.push_str("<ul>\n");
        for item in &section.items {
            html.push_str("<li>");
            let aria = if item.active {
                " aria-current=\"page\""
            } else {
                ""
            };
            let _ = write!(
                html,
                "<a href=\"{}\"{aria}>{}</a>",
                escape(&resolve_link(base, &item.link)),
                escape(&item.text),
            );
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n</section>\n");
    }
    html.push_str("</aside>\n");
}

fn render_pagination(html: &mut String, pagination: &Pagination, base: &str) {
    if pagination.prev.is_none() && pagination.next.is_none() {
        return;
    }
    html.push_str("<nav class=\"pagination\">\n");
    for (rel, link) in [("prev", &pagination.prev), ("next", &pagination.next)] {
        if let Some(link) = link {
            let _ = writeln!(
                html,
                "<a rel=\"{rel}\" href=\"{}\">{}</a>",
                escape(&resolve_link(base, &link.link)),
                escape(&link.text),
            );
        }
    }
    html.push_str("</nav>\n");
}

fn render_footer(html: &mut String, config: &SiteConfig) {
    let Some(footer) = &config.theme().footer else {
        return;
    };
    html.push_str("<footer>\n");
    if let Some(message) = &footer.message {
        let _ = writeln!(html, "<p class=\"message\">{}</p>", escape(message));
    }
    if let Some(copyright) = &footer.copyright {
        let _ = writeln!(html, "<p class=\"copyright\">{}</p>", escape(copyright));
    }
    html.push_str("</footer>\n");
}

fn render_link(html: &mut String, link: &NavLink, base: &str, active: bool) {
    let mut attrs = String::new();
    if active {
        attrs.push_str(" aria-current=\"page\"");
    }
    if link.is_external() {
        attrs.push_str(" rel=\"noopener\"");
    }
    let _ = writeln!(
        html,
        "<a href=\"{}\"{attrs}>{}</a>",
        escape(&resolve_link(base, &link.link)),
        escape(&link.text),
    );
}

/// Escape HTML special characters.
fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::site::Site;
    use crate::site_config::{Footer, HeadTag, SidebarSection, SocialLink, ThemeOptions};

    fn site() -> Site {
        let mut builder = SiteConfig::builder("Vide");
        builder
            .set_base("/vide/")
            .set_description("A reactive UI library for Luau.")
            .add_head_tag(HeadTag {
                tag: "link".to_owned(),
                attrs: BTreeMap::from([
                    ("href".to_owned(), "/vide/logo.svg".to_owned()),
                    ("rel".to_owned(), "icon".to_owned()),
                ]),
                content: None,
            })
            .set_theme(ThemeOptions {
                logo: Some("/logo.svg".to_owned()),
                footer: Some(Footer {
                    message: Some("Released under the MIT License.".to_owned()),
                    copyright: None,
                }),
                social_links: vec![SocialLink {
                    icon: "github".to_owned(),
                    link: "https://github.com/centau/vide".to_owned(),
                }],
            })
            .add_nav_link(NavLink::new("Home", "/"))
            .add_nav_link(NavLink::new("API", "/api/reactivity-core").with_active_match("/api/"))
            .add_scope(
                "/api/",
                vec![SidebarSection::new(
                    "API <core>",
                    vec![
                        NavLink::new("Reactivity: Core", "/api/reactivity-core"),
                        NavLink::new("Element Creation", "/api/creation"),
                        NavLink::new("Animation", "/api/animation"),
                    ],
                )],
            );
        Site::new(builder.build().unwrap())
    }

    #[test]
    fn default_layout_contains_body_and_title() {
        let html = site()
            .render("/api/creation", "<p>Hello</p>", &DefaultLayout)
            .unwrap();

        assert!(html.contains("<main>\n<p>Hello</p>\n</main>"));
        assert!(html.contains("<title>Element Creation | Vide</title>"));
        assert!(html.contains("content=\"A reactive UI library for Luau.\""));
        assert!(html.contains("<link href=\"/vide/logo.svg\" rel=\"icon\">"));
    }

    #[test]
    fn default_layout_marks_active_entries() {
        let html = site().render("/api/creation", "", &DefaultLayout).unwrap();

        assert!(html.contains(
            "<a href=\"/vide/api/reactivity-core\" aria-current=\"page\">API</a>"
        ));
        assert!(html.contains(
            "<a href=\"/vide/api/creation\" aria-current=\"page\">Element Creation</a>"
        ));
        assert_eq!(html.matches("aria-current").count(), 2);
    }

    #[test]
    fn default_layout_renders_pagination_with_base() {
        let html = site().render("/api/creation", "", &DefaultLayout).unwrap();

        assert!(html.contains(
            "<a rel=\"prev\" href=\"/vide/api/reactivity-core\">Reactivity: Core</a>"
        ));
        assert!(html.contains("<a rel=\"next\" href=\"/vide/api/animation\">Animation</a>"));
    }

    #[test]
    fn default_layout_without_sidebar() {
        let html = site().render("/", "", &DefaultLayout).unwrap();

        assert!(!html.contains("<aside"));
        assert!(!html.contains("class=\"pagination\""));
        assert!(html.contains("<a href=\"/vide/\" aria-current=\"page\">Home</a>"));
    }

    #[test]
    fn default_layout_closes_non_void_head_tags() {
        let mut builder = SiteConfig::builder("Vide");
        builder
            .add_head_tag(HeadTag {
                tag: "script".to_owned(),
                attrs: BTreeMap::from([("src".to_owned(), "/analytics.js".to_owned())]),
                content: None,
            })
            .add_head_tag(HeadTag {
                tag: "style".to_owned(),
                attrs: BTreeMap::new(),
                content: Some("body { margin: 0 }".to_owned()),
            })
            .add_head_tag(HeadTag {
                tag: "meta".to_owned(),
                attrs: BTreeMap::from([("name".to_owned(), "theme-color".to_owned())]),
                content: Some("ignored".to_owned()),
            });
        let site = Site::new(builder.build().unwrap());

        let html = site.render("/", "<p>Body</p>", &DefaultLayout).unwrap();

        assert!(html.contains("<script src=\"/analytics.js\"></script>\n"));
        assert!(html.contains("<style>body { margin: 0 }</style>\n"));
        assert!(html.contains("<meta name=\"theme-color\">\n"));
        assert!(!html.contains("ignored"));
        let head_end = html.find("</head>").unwrap();
        assert!(html.find("<main>").unwrap() > head_end);
    }

    #[test]
    fn default_layout_escapes_text() {
        let html = site().render("/api/creation", "", &DefaultLayout).unwrap();

        assert!(html.contains("<h2>API &lt;core&gt;</h2>"));
    }

    #[test]
    fn default_layout_theme_options() {
        let html = site().render("/", "", &DefaultLayout).unwrap();

        assert!(html.contains("<img class=\"logo\" src=\"/vide/logo.svg\" alt=\"\">"));
        assert!(html.contains("href=\"https://github.com/centau/vide\" aria-label=\"github\""));
        assert!(html.contains("<p class=\"message\">Released under the MIT License.</p>"));
        assert!(!html.contains("class=\"copyright\""));
    }

    #[test]
    fn extended_layout_injects_slots_in_order() {
        let layout = ExtendedLayout::new(DefaultLayout)
            .with_slot(Slot::AfterContent, "<div class=\"after\"></div>")
            .with_slot(Slot::BeforeContent, "<div class=\"banner\"></div>")
            .with_slot(Slot::BeforeContent, "<div class=\"notice\"></div>");

        let html = site()
            .render("/api/creation", "<p>Body</p>", &layout)
            .unwrap();

        let expected = concat!(
            "<main>\n<div class=\"banner\"></div>\n<div class=\"notice\"></div>\n",
            "<p>Body</p>\n<div class=\"after\"></div>\n</main>",
        );
        assert!(html.contains(expected));
    }

    #[test]
    fn extended_layout_without_slots_matches_base() {
        let site = site();

        let base = site
            .render("/api/creation", "<p>x</p>", &DefaultLayout)
            .unwrap();
        let extended = site
            .render("/api/creation", "<p>x</p>", &ExtendedLayout::new(DefaultLayout))
            .unwrap();

        assert_eq!(base, extended);
    }

    #[test]
    fn escape_special_characters() {
        assert_eq!(escape("<script>"), "&lt;script&gt;");
        assert_eq!(escape("a&b"), "a&amp;b");
        assert_eq!(escape("\"hello\""), "&quot;hello&quot;");
    }
}
