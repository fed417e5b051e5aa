//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! The types here are the raw file representation. Structural checks on the
//! navigation tree (duplicate links, overlapping scopes) belong to the
//! navigation resolver, which builds its own validated model from them.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.base`
//! - `theme.logo`
//! - `theme.footer.message`
//! - `theme.footer.copyright`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the site base path.
    pub base: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Placeholder substituted with the page title in `site.title_template`.
pub const TITLE_PLACEHOLDER: &str = ":title";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site metadata. Required by every command that resolves navigation.
    pub site: Option<SiteSection>,
    /// Theme options.
    pub theme: ThemeSection,
    /// Top navigation bar entries, in display order.
    pub nav: Vec<NavEntry>,
    /// Sidebar trees keyed by path scope, in declaration order.
    pub sidebar: Vec<SidebarEntry>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[site]` section.
#[derive(Debug, Deserialize)]
pub struct SiteSection {
    /// Site title.
    pub title: String,
    /// Document title template containing `:title`.
    #[serde(default)]
    pub title_template: Option<String>,
    /// Site description.
    #[serde(default)]
    pub description: Option<String>,
    /// Base path the site is deployed under.
    #[serde(default = "default_base")]
    pub base: String,
    /// Extra tags for the document head.
    #[serde(default)]
    pub head: Vec<HeadEntry>,
}

fn default_base() -> String {
    "/".to_owned()
}

/// A `[[site.head]]` entry.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct HeadEntry {
    /// Tag name (e.g. `link`, `meta`).
    pub tag: String,
    /// Tag attributes.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Inner content (e.g. an inline script).
    pub content: Option<String>,
}

/// `[theme]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThemeSection {
    /// Logo image path or URL.
    pub logo: Option<String>,
    /// Footer text.
    pub footer: Option<FooterSection>,
    /// Social icon links.
    pub social_links: Vec<SocialLinkEntry>,
}

/// `[theme.footer]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FooterSection {
    pub message: Option<String>,
    pub copyright: Option<String>,
}

/// Social icon link.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct SocialLinkEntry {
    /// Icon name (e.g. `github`).
    pub icon: String,
    /// Absolute URL.
    pub link: String,
}

/// A `[[nav]]` entry.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct NavEntry {
    pub text: String,
    pub link: String,
    /// Prefix used instead of `link` when deciding whether the entry is active.
    #[serde(default)]
    pub active_match: Option<String>,
}

/// A `[[sidebar]]` entry: all sections shown for one path scope.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct SidebarEntry {
    /// Path prefix (e.g. `/api/`).
    pub scope: String,
    #[serde(default)]
    pub sections: Vec<SidebarSectionEntry>,
}

/// A `[[sidebar.sections]]` entry.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct SidebarSectionEntry {
    pub text: String,
    #[serde(default)]
    pub items: Vec<LinkEntry>,
}

/// A sidebar link.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct LinkEntry {
    pub text: String,
    pub link: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.base`").
        field: String,
        /// Error message (e.g., "${`DOCS_BASE`} environment variable not found").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents,
    /// falling back to an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings)?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) -> Result<(), ConfigError> {
        if let Some(base) = &settings.base {
            let site = self.site.as_mut().ok_or_else(|| {
                ConfigError::Validation("--base requires a [site] section in config".to_owned())
            })?;
            site.base.clone_from(base);
        }
        Ok(())
    }

    /// Get the `[site]` section.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing.
    pub fn require_site(&self) -> Result<&SiteSection, ConfigError> {
        self.site
            .as_ref()
            .ok_or_else(|| ConfigError::Validation("[site] section required in config".into()))
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Only checks what can be judged field by field. Called automatically
    /// after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(site) = &self.site {
            require_non_empty(&site.title, "site.title")?;
            require_non_empty(&site.base, "site.base")?;
            if let Some(template) = &site.title_template
                && !template.contains(TITLE_PLACEHOLDER)
            {
                return Err(ConfigError::Validation(format!(
                    "site.title_template must contain {TITLE_PLACEHOLDER}"
                )));
            }
            for (i, head) in site.head.iter().enumerate() {
                require_non_empty(&head.tag, &format!("site.head[{i}].tag"))?;
            }
        }
        for (i, entry) in self.sidebar.iter().enumerate() {
            require_non_empty(&entry.scope, &format!("sidebar[{i}].scope"))?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref mut site) = self.site {
            site.base = expand::expand_env(&site.base, "site.base")?;
        }

        expand::expand_opt(&mut self.theme.logo, "theme.logo")?;

        if let Some(ref mut footer) = self.theme.footer {
            expand::expand_opt(&mut footer.message, "theme.footer.message")?;
            expand::expand_opt(&mut footer.copyright, "theme.footer.copyright")?;
        }

        Ok(())
    }
}
