//! `docsite search` command implementation.

use clap::Args;
use docsite_catalog::SearchResults;
use docsite_config::Config;

use super::client_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the search command.
#[derive(Args)]
pub(crate) struct SearchArgs {
    /// Text to search for (at least three characters).
    query: String,
}

impl SearchArgs {
    /// Execute the search command.
    pub(crate) fn execute(self, config: &Config, output: &Output) -> Result<(), CliError> {
        let client = client_from_config(config);
        let state = client.search(&self.query);
        if let Some(err) = state.error {
            return Err(err.into());
        }
        let Some(results) = state.data else {
            return Err(CliError::Validation(
                "Search query must be longer than 2 characters".to_owned(),
            ));
        };

        if results.results.is_empty() {
            output.warning(&format!("No results for \"{}\"", self.query));
            return Ok(());
        }
        for (heading, detail) in result_lines(&results) {
            output.highlight(&heading);
            if let Some(detail) = detail {
                output.muted(&detail);
            }
        }
        Ok(())
    }
}

/// Heading (`id: title`) and optional description per result.
fn result_lines(results: &SearchResults) -> Vec<(String, Option<String>)> {
    results
        .results
        .iter()
        .map(|section| {
            (
                format!("{}: {}", section.id, section.title),
                section.description.as_ref().map(|d| format!("  {d}")),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use docsite_catalog::Section;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_result_lines() {
        let results = SearchResults {
            results: vec![
                Section::new("plugin-host", "Plugin Host", "")
                    .with_description("Extend the toolkit"),
                Section::new("installation", "Installation", ""),
            ],
        };

        assert_eq!(
            result_lines(&results),
            vec![
                (
                    "plugin-host: Plugin Host".to_owned(),
                    Some("  Extend the toolkit".to_owned())
                ),
                ("installation: Installation".to_owned(), None),
            ]
        );
    }
}
