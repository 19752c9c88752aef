//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for config loading and client initialization.

use std::path::PathBuf;

use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::SecurityHubClient;
use crate::config::Config;
use crate::error::Result;
use crate::fetch::FileRunStateStore;

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded and validated configuration
    pub config: Config,
    /// Where the configuration was loaded from
    pub config_path: PathBuf,
    /// Security Hub client for the resolved endpoint
    pub client: SecurityHubClient,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// Loads config from the given path (or the default location), applies
    /// the endpoint override, and builds the API client.
    ///
    /// # Errors
    /// Returns error if config cannot be loaded or the endpoint is not a valid URL.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let mut config = Config::load_at(&config_path)?;

        if let Some(endpoint) = opts.endpoint_ref() {
            config.endpoint = Some(endpoint.to_string());
        }

        let endpoint = config.endpoint_url();
        debug!("Using Security Hub endpoint {}", endpoint);
        let client = SecurityHubClient::new(&endpoint)?;

        Ok(Self {
            config,
            config_path,
            client,
            format: opts.format,
        })
    }

    /// The run-state store for this configuration.
    pub fn state_store(&self) -> FileRunStateStore {
        FileRunStateStore::new(self.config.state_file(&self.config_path))
    }
}
