//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod context;
pub mod fetch;
pub mod findings;
pub mod init;
pub mod members;
pub mod status;
pub mod tag;

pub use args::{FindingFilterArgs, OutputFormat, PaginationArgs};
pub use context::CommandContext;

use crate::fetch::SeverityFloor;

/// hubpoll - AWS Security Hub findings poller
#[derive(Parser, Debug)]
#[command(name = "hubpoll")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "HUBPOLL_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "HUBPOLL_CONFIG", hide_env = true)]
    pub config: Option<PathBuf>,

    /// Override the Security Hub endpoint
    #[arg(long, global = true, env = "HUBPOLL_ENDPOINT", hide_env = true)]
    pub endpoint: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "HUBPOLL_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a starter configuration file (stores --endpoint if given)
    Init {
        /// AWS region
        #[arg(long, default_value = "us-east-1")]
        region: String,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show configuration and fetch cursor
    Status,

    /// Display version information
    Version,

    /// Query findings
    #[command(subcommand)]
    Findings(FindingsCommands),

    /// Query member accounts
    #[command(subcommand)]
    Members(MembersCommands),

    /// Fetch new findings as incidents and advance the cursor
    Fetch {
        /// Minimum severity (overrides the config file)
        #[arg(long, value_enum, hide_possible_values = true)]
        severity: Option<SeverityFloor>,

        /// Include archived findings
        #[arg(long)]
        include_archived: bool,

        /// Archive findings once fetched
        #[arg(long)]
        archive: bool,

        /// Fetch without persisting the cursor
        #[arg(long)]
        dry_run: bool,
    },

    /// Add tags to a Security Hub resource
    TagResource {
        /// Resource ARN
        resource_arn: String,

        /// Tags: key=<k>,value=<v>[;key=...]
        #[arg(long, short = 't')]
        tags: String,
    },
}

/// Findings subcommands
#[derive(Subcommand, Debug)]
pub enum FindingsCommands {
    /// List findings matching the given filters
    List {
        #[command(flatten)]
        filters: FindingFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },
}

/// Member account subcommands
#[derive(Subcommand, Debug)]
pub enum MembersCommands {
    /// List member accounts
    List {
        /// Only members associated with this administrator account
        #[arg(long)]
        only_associated: Option<bool>,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Get member accounts by id
    Get {
        /// Comma-separated account ids
        #[arg(long)]
        account_ids: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fetch_flags() {
        let cli = Cli::parse_from([
            "hubpoll",
            "fetch",
            "--severity",
            "high",
            "--include-archived",
            "--dry-run",
        ]);

        match cli.command {
            Commands::Fetch {
                severity,
                include_archived,
                archive,
                dry_run,
            } => {
                assert_eq!(severity, Some(SeverityFloor::High));
                assert!(include_archived);
                assert!(!archive);
                assert!(dry_run);
            }
            other => panic!("Expected fetch command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_findings_list() {
        let cli = Cli::parse_from([
            "hubpoll",
            "--format",
            "json",
            "findings",
            "list",
            "--filters",
            "name=ProductName,value=GuardDuty,comparison=equals",
            "-n",
            "10",
        ]);

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Findings(FindingsCommands::List {
                filters,
                pagination,
            }) => {
                assert!(filters.filters.is_some());
                assert_eq!(pagination.max_results, Some(10));
            }
            other => panic!("Expected findings list, got {:?}", other),
        }
    }

    #[test]
    fn test_max_results_is_bounded() {
        let result = Cli::try_parse_from(["hubpoll", "findings", "list", "-n", "500"]);
        assert!(result.is_err());
    }
}
