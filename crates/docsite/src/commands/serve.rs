//! `docsite serve` command implementation.

use std::path::Path;

use clap::Args;
use docsite_config::{CliSettings, Config};
use docsite_server::{run_server, server_config_from_docsite_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(
        self,
        config_path: Option<&Path>,
        base_settings: CliSettings,
        output: &Output,
    ) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            ..base_settings
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        match &config.docs_resolved.catalog_path {
            Some(path) => output.info(&format!("Catalog: {}", path.display())),
            None => output.info("Catalog: builtin"),
        }
        output.info(&format!(
            "Default section: {}",
            config.docs_resolved.default_section
        ));

        let server_config = server_config_from_docsite_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
