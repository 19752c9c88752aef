//! Global CLI options shared across all commands

use std::path::{Path, PathBuf};

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; config file values are resolved later in
/// `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.hubpoll/config.yaml)
    pub config: Option<PathBuf>,

    /// Endpoint override (bypasses the config file)
    pub endpoint: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            endpoint: cli.endpoint.clone(),
        }
    }

    /// Get config path as `Option<&Path>`.
    pub fn config_ref(&self) -> Option<&Path> {
        self.config.as_deref()
    }

    /// Get endpoint override as `Option<&str>`.
    pub fn endpoint_ref(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}
