//! `docnav resolve` command implementation.

use clap::Args;

use crate::commands::{ConfigArgs, report_warnings};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Route to resolve (e.g. /api/creation).
    route: String,

    /// Treat the route as a full URL path that includes the base path.
    #[arg(long)]
    url: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

impl ResolveArgs {
    /// Execute the resolve command, printing the navigation as JSON.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (_, site) = self.config.load()?;

        let nav = if self.url {
            site.resolve_url(&self.route)?
        } else {
            site.resolve(&self.route)?
        };
        report_warnings(&output, &nav);

        output.data(&serde_json::to_string_pretty(&nav)?)?;
        Ok(())
    }
}
