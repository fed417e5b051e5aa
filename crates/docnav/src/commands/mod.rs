//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod pages;
pub(crate) mod render;
pub(crate) mod resolve;

use std::path::PathBuf;

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_site::{PageNav, Site};

use crate::error::CliError;
use crate::output::Output;
use crate::site::site_from_config;

pub(crate) use check::CheckArgs;
pub(crate) use pages::PagesArgs;
pub(crate) use render::RenderArgs;
pub(crate) use resolve::ResolveArgs;

/// Configuration arguments shared by all commands.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long, env = "DOCNAV_CONFIG")]
    config: Option<PathBuf>,

    /// Site base path (overrides config).
    #[arg(long)]
    base: Option<String>,
}

impl ConfigArgs {
    /// Load configuration and build the validated site.
    pub(crate) fn load(&self) -> Result<(Config, Site), CliError> {
        let cli_settings = CliSettings {
            base: self.base.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = site_from_config(&config)?;
        Ok((config, site))
    }
}

/// Report resolution warnings on stderr.
fn report_warnings(output: &Output, nav: &PageNav) {
    for warning in &nav.warnings {
        output.warning(&format!("Warning: {warning}"));
    }
}
