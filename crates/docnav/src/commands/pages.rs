//! `docnav pages` command implementation.

use clap::Args;
use docnav_site::PageEntry;

use crate::commands::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the pages command.
#[derive(Args)]
pub(crate) struct PagesArgs {
    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

impl PagesArgs {
    /// Execute the pages command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (_, site) = self.config.load()?;
        let pages = site.pages();

        if self.json {
            output.data(&serde_json::to_string_pretty(&pages)?)?;
        } else {
            for page in &pages {
                output.data(&format_page(page))?;
            }
        }
        Ok(())
    }
}

/// One table row: scope, route, previous and next links.
fn format_page(page: &PageEntry) -> String {
    let link = |link: Option<&docnav_site::NavLink>| {
        link.map_or_else(|| "-".to_owned(), |link| link.link.clone())
    };
    format!(
        "{}\t{}\tprev: {}\tnext: {}",
        page.scope,
        page.route,
        link(page.pagination.prev.as_ref()),
        link(page.pagination.next.as_ref()),
    )
}
