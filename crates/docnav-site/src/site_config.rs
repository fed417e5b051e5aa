//! Validated site configuration.
//!
//! [`SiteConfig`] is the immutable aggregate every page render reads from.
//! It can only be obtained from [`SiteConfigBuilder::build`], which runs the
//! full validation pass, so a `SiteConfig` in hand is always well formed:
//! links are absolute URLs or site paths, scopes are distinct, and no two
//! entries in one scope point at the same page.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::error::ConfigurationError;
use crate::route::{is_external, normalize_path};

/// A single navigation entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    /// Display text.
    pub text: String,
    /// Absolute URL or site path (without the base).
    pub link: String,
    /// Prefix that marks a top navigation entry active instead of `link`.
    ///
    /// Ignored for sidebar entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_match: Option<String>,
}

impl NavLink {
    /// Create a link without an active-match override.
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
            active_match: None,
        }
    }

    /// Set the prefix used for top navigation matching.
    #[must_use]
    pub fn with_active_match(mut self, prefix: impl Into<String>) -> Self {
        self.active_match = Some(prefix.into());
        self
    }

    /// Whether the link points outside the site.
    #[must_use]
    pub fn is_external(&self) -> bool {
        is_external(&self.link)
    }
}

/// A named group of sidebar links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarSection {
    pub text: String,
    pub items: Vec<NavLink>,
}

impl SidebarSection {
    pub fn new(text: impl Into<String>, items: Vec<NavLink>) -> Self {
        Self {
            text: text.into(),
            items,
        }
    }
}

/// All sidebar sections shown under one path scope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarScope {
    /// Path prefix (e.g. `/api/`).
    pub scope: String,
    pub sections: Vec<SidebarSection>,
}

/// Sidebar trees in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SidebarConfig {
    scopes: Vec<SidebarScope>,
}

impl SidebarConfig {
    /// Iterate scopes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &SidebarScope> {
        self.scopes.iter()
    }

    /// Look up a scope by its exact prefix.
    #[must_use]
    pub fn get(&self, scope: &str) -> Option<&SidebarScope> {
        self.scopes.iter().find(|s| s.scope == scope)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

/// Extra tag for the document head.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeadTag {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    /// Inner HTML, inserted verbatim. Ignored for void elements.
    pub content: Option<String>,
}

/// Social icon link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub icon: String,
    pub link: String,
}

/// Footer text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub message: Option<String>,
    pub copyright: Option<String>,
}

/// Theme options passed through to layouts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeOptions {
    pub logo: Option<String>,
    pub footer: Option<Footer>,
    pub social_links: Vec<SocialLink>,
}

/// Validated, immutable site configuration.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    title: String,
    title_template: Option<String>,
    description: Option<String>,
    base: String,
    head: Vec<HeadTag>,
    nav: Vec<NavLink>,
    sidebar: SidebarConfig,
    theme: ThemeOptions,
}

impl SiteConfig {
    /// Start building a configuration for a site titled `title`.
    pub fn builder(title: impl Into<String>) -> SiteConfigBuilder {
        SiteConfigBuilder::new(title)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Document title template containing `:title`.
    #[must_use]
    pub fn title_template(&self) -> Option<&str> {
        self.title_template.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Base path, always starting and ending with `/`.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn head(&self) -> &[HeadTag] {
        &self.head
    }

    /// Top navigation entries in display order.
    #[must_use]
    pub fn nav(&self) -> &[NavLink] {
        &self.nav
    }

    #[must_use]
    pub fn sidebar(&self) -> &SidebarConfig {
        &self.sidebar
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeOptions {
        &self.theme
    }
}

/// Builder for [`SiteConfig`].
///
/// Collects declarations in order; [`build`](Self::build) validates them all
/// at once.
#[derive(Debug)]
pub struct SiteConfigBuilder {
    title: String,
    title_template: Option<String>,
    description: Option<String>,
    base: String,
    head: Vec<HeadTag>,
    nav: Vec<NavLink>,
    scopes: Vec<SidebarScope>,
    theme: ThemeOptions,
}

impl SiteConfigBuilder {
    /// Create a builder with base `/` and no navigation.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            title_template: None,
            description: None,
            base: "/".to_owned(),
            head: Vec::new(),
            nav: Vec::new(),
            scopes: Vec::new(),
            theme: ThemeOptions::default(),
        }
    }

    pub fn set_title_template(&mut self, template: impl Into<String>) -> &mut Self {
        self.title_template = Some(template.into());
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    pub fn set_base(&mut self, base: impl Into<String>) -> &mut Self {
        self.base = base.into();
        self
    }

    pub fn set_theme(&mut self, theme: ThemeOptions) -> &mut Self {
        self.theme = theme;
        self
    }

    pub fn add_head_tag(&mut self, tag: HeadTag) -> &mut Self {
        self.head.push(tag);
        self
    }

    /// Append a top navigation entry.
    pub fn add_nav_link(&mut self, link: NavLink) -> &mut Self {
        self.nav.push(link);
        self
    }

    /// Append a sidebar scope with its sections.
    pub fn add_scope(
        &mut self,
        scope: impl Into<String>,
        sections: Vec<SidebarSection>,
    ) -> &mut Self {
        self.scopes.push(SidebarScope {
            scope: scope.into(),
            sections,
        });
        self
    }

    /// Validate all declarations and produce the immutable configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found, naming the offending
    /// scope, section and link.
    pub fn build(self) -> Result<SiteConfig, ConfigurationError> {
        self.validate()?;

        Ok(SiteConfig {
            title: self.title,
            title_template: self.title_template,
            description: self.description,
            base: self.base,
            head: self.head,
            nav: self.nav,
            sidebar: SidebarConfig {
                scopes: self.scopes,
            },
            theme: self.theme,
        })
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        require_text(&self.title, "site title")?;

        if !self.base.starts_with('/') || !self.base.ends_with('/') {
            return Err(ConfigurationError::InvalidBase(self.base.clone()));
        }

        for link in &self.nav {
            require_text(&link.text, "top navigation link text")?;
            require_link(&link.link, "top navigation")?;
            if let Some(prefix) = &link.active_match
                && !prefix.starts_with('/')
            {
                return Err(ConfigurationError::InvalidLink {
                    link: prefix.clone(),
                    context: format!("active match of top navigation entry {:?}", link.text),
                });
            }
        }

        for social in &self.theme.social_links {
            require_text(&social.icon, "social link icon")?;
            if !is_external(&social.link) {
                return Err(ConfigurationError::InvalidLink {
                    link: social.link.clone(),
                    context: "social links".to_owned(),
                });
            }
        }

        let mut seen_scopes = HashSet::new();
        for scope in &self.scopes {
            validate_scope(scope)?;
            if !seen_scopes.insert(scope.scope.as_str()) {
                return Err(ConfigurationError::DuplicateScope(scope.scope.clone()));
            }
        }

        Ok(())
    }
}

/// Validate one sidebar scope: prefix shape, link shape, and link uniqueness
/// across every section in the scope.
fn validate_scope(scope: &SidebarScope) -> Result<(), ConfigurationError> {
    if scope.scope.is_empty() {
        return Err(ConfigurationError::InvalidScope {
            scope: scope.scope.clone(),
            reason: "scope is empty",
        });
    }
    if !scope.scope.starts_with('/') {
        return Err(ConfigurationError::InvalidScope {
            scope: scope.scope.clone(),
            reason: "scope must start with '/'",
        });
    }
    if scope.sections.is_empty() {
        return Err(ConfigurationError::EmptyScope(scope.scope.clone()));
    }

    let mut seen = HashSet::new();
    for section in &scope.sections {
        require_text(
            &section.text,
            &format!("section title in sidebar {}", scope.scope),
        )?;
        for item in &section.items {
            let context = format!("sidebar {} section {:?}", scope.scope, section.text);
            require_text(&item.text, &format!("link text in {context}"))?;
            require_link(&item.link, &context)?;

            if item.is_external() {
                continue;
            }
            if !seen.insert(normalize_path(&item.link)) {
                return Err(ConfigurationError::DuplicateLink {
                    scope: scope.scope.clone(),
                    section: section.text.clone(),
                    link: item.link.clone(),
                });
            }
        }
    }
    Ok(())
}

fn require_text(value: &str, field: &str) -> Result<(), ConfigurationError> {
    if value.trim().is_empty() {
        return Err(ConfigurationError::EmptyField {
            field: field.to_owned(),
        });
    }
    Ok(())
}

fn require_link(link: &str, context: &str) -> Result<(), ConfigurationError> {
    if link.starts_with('/') || is_external(link) {
        return Ok(());
    }
    Err(ConfigurationError::InvalidLink {
        link: link.to_owned(),
        context: context.to_owned(),
    })
}
