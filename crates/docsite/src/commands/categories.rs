//! `docsite categories` command implementation.

use clap::Args;
use docsite_catalog::{Category, Section};
use docsite_config::Config;

use super::client_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the categories command.
#[derive(Args)]
pub(crate) struct CategoriesArgs {
    /// Also list nested subsections.
    #[arg(short, long)]
    all: bool,
}

impl CategoriesArgs {
    /// Execute the categories command.
    pub(crate) fn execute(self, config: &Config, output: &Output) -> Result<(), CliError> {
        let client = client_from_config(config);
        let state = client.categories();
        if let Some(err) = state.error {
            return Err(err.into());
        }

        let categories = state.data.unwrap_or_default();
        if categories.is_empty() {
            output.warning("No categories found");
            return Ok(());
        }

        for category in &categories {
            output.highlight(&category_heading(category));
            for line in section_lines(&category.sections, self.all, 1) {
                output.print(&line);
            }
        }
        Ok(())
    }
}

fn category_heading(category: &Category) -> String {
    match &category.icon {
        Some(icon) => format!("{} [{icon}]", category.title),
        None => category.title.clone(),
    }
}

/// One line per section: indented id and title.
fn section_lines(sections: &[Section], recursive: bool, depth: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for section in sections {
        lines.push(format!(
            "{}{:<20} {}",
            "  ".repeat(depth),
            section.id,
            section.title
        ));
        if recursive {
            lines.extend(section_lines(&section.subsections, recursive, depth + 1));
        }
    }
    lines
}
