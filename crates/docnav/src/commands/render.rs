//! `docnav render` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_site::{DefaultLayout, ExtendedLayout, Slot};

use crate::commands::{ConfigArgs, report_warnings};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Route to render (e.g. /api/creation).
    route: String,

    /// File with the page body HTML (default: empty body).
    #[arg(short, long)]
    body: Option<PathBuf>,

    /// HTML fragment inserted before the page body.
    #[arg(long)]
    before_content: Vec<String>,

    /// HTML fragment inserted after the page body.
    #[arg(long)]
    after_content: Vec<String>,

    #[command(flatten)]
    config: ConfigArgs,
}

impl RenderArgs {
    /// Execute the render command, printing the HTML page.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (_, site) = self.config.load()?;

        let body = match &self.body {
            Some(path) => std::fs::read_to_string(path)?,
            None => String::new(),
        };

        let mut layout = ExtendedLayout::new(DefaultLayout);
        for fragment in self.before_content {
            layout = layout.with_slot(Slot::BeforeContent, fragment);
        }
        for fragment in self.after_content {
            layout = layout.with_slot(Slot::AfterContent, fragment);
        }

        let nav = site.resolve(&self.route)?;
        report_warnings(&output, &nav);
        let html = site.render_nav(&nav, &body, &layout);

        output.data(&html)?;
        Ok(())
    }
}
