//! `docsite show` command implementation.

use std::time::Duration;

use clap::Args;
use docsite_config::Config;
use docsite_view::{ContentSource, DocsPage};

use super::client_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Section id (default: configured default section).
    id: Option<String>,

    /// Render the complete documentation page as HTML.
    #[arg(long)]
    html: bool,
}

impl ShowArgs {
    /// Execute the show command.
    pub(crate) fn execute(self, config: &Config, output: &Output) -> Result<(), CliError> {
        let id = self
            .id
            .unwrap_or_else(|| config.docs_resolved.default_section.clone());
        let client = client_from_config(config);

        if self.html {
            let mut page = DocsPage::new(client).with_active_section(id);
            page.load();
            output.print(&render_settled(&mut page, std::thread::sleep));
            return Ok(());
        }

        let state = client.section(&id);
        if let Some(err) = state.error {
            return Err(err.into());
        }
        match state.data {
            Some(section) => {
                output.print(&section.content);
                Ok(())
            }
            None => Err(CliError::Validation(
                "Section id must not be empty".to_owned(),
            )),
        }
    }
}

/// Render the page once pending placeholder substitutions have been applied.
///
/// `wait` is called at most once, with the time left until they are due.
fn render_settled<S, W>(page: &mut DocsPage<S>, wait: W) -> String
where
    S: ContentSource,
    W: FnOnce(Duration),
{
    let html = page.render();
    let Some(delay) = page.next_substitution_in() else {
        return html;
    };
    wait(delay);
    page.render()
}
