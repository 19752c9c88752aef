//! Init command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Run the init command
///
/// Writes a config with default fetch settings. Refuses to overwrite an
/// existing file unless `force` is set.
pub fn run(opts: &GlobalOptions, region: &str, force: bool) -> Result<()> {
    let path = Config::resolve_path(opts.config_ref())?;

    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.display().to_string()).into());
    }

    let config = Config {
        endpoint: opts.endpoint.clone(),
        region: region.to_string(),
        ..Default::default()
    };
    config.validate()?;
    config.save_at(&path)?;

    println!("{}", "✓ Configuration saved!".green());
    println!("Config file: {}", path.display().to_string().cyan());
    println!("Endpoint: {}", config.endpoint_url());
    println!("\nRun {} to pull new findings.", "hubpoll fetch".bold());

    Ok(())
}
