//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;
use crate::fetch::{FileRunStateStore, RunStateStore};

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "hubpoll Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;

    match Config::load_at(&config_path) {
        Ok(mut config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());

            if let Some(endpoint) = opts.endpoint_ref() {
                config.endpoint = Some(endpoint.to_string());
            }
            println!("Endpoint: {}", config.endpoint_url());
            println!("Region: {}", config.region);
            println!();

            println!(
                "{} Minimum severity: {:?}",
                "○".dimmed(),
                config.fetch.severity
            );
            if config.fetch.archive_fetched {
                println!("{} Fetched findings are archived", "○".dimmed());
            }

            let store = FileRunStateStore::new(config.state_file(&config_path));
            match store.get_last_run() {
                Ok(Some(last_run)) => {
                    println!("{} Last run: {}", "✓".green(), last_run.last_run)
                }
                Ok(None) => println!(
                    "{} No fetch yet (first fetch: {})",
                    "○".dimmed(),
                    config.fetch.first_fetch
                ),
                Err(err) => println!("{} {}", "✗".red(), err),
            }
            println!("State file: {}", store.path().display());
        }
        Err(err) => {
            println!("{} {}", "✗".red(), err);
            println!("  → Run 'hubpoll init' to configure");
        }
    }

    Ok(())
}
