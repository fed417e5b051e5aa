//! `docnav check` command implementation.

use clap::Args;

use crate::commands::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Validation failures are errors. Pages listed under a scope that does
    /// not resolve back to that scope are reported as warnings, since they
    /// would render without their own sidebar.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, site) = self.config.load()?;

        if let Some(path) = &config.config_path {
            output.info(&format!("Configuration: {}", path.display()));
        }

        let site_config = site.config();
        output.highlight(site_config.title());
        output.info(&format!("Base: {}", site_config.base()));
        output.info(&format!("Top navigation entries: {}", site_config.nav().len()));

        let pages = site.pages();
        for scope in site_config.sidebar().iter() {
            let count = pages
                .iter()
                .filter(|page| page.scope == scope.scope)
                .count();
            output.info(&format!(
                "Sidebar {}: {} section(s), {} page(s)",
                scope.scope,
                scope.sections.len(),
                count
            ));
        }

        let mut misplaced = 0;
        for page in &pages {
            let nav = site.resolve(&page.route)?;
            let resolved = nav.sidebar.as_ref().map(|sidebar| sidebar.scope.as_str());
            if resolved != Some(page.scope.as_str()) {
                misplaced += 1;
                output.warning(&format!(
                    "Warning: {} is listed in sidebar {} but resolves to {}",
                    page.route,
                    page.scope,
                    resolved.unwrap_or("no sidebar")
                ));
            }
        }

        if misplaced == 0 {
            output.success("Configuration is valid");
        } else {
            output.success(&format!("Configuration is valid ({misplaced} warning(s))"));
        }
        Ok(())
    }
}
