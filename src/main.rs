//! hubpoll - AWS Security Hub findings poller

use clap::Parser;
use log::LevelFilter;

mod cli;
mod client;
mod commands;
mod config;
mod error;
mod fetch;
mod models;
mod output;
mod parse;

use cli::args::GlobalOptions;
use cli::fetch::FetchOverrides;
use cli::{Cli, Commands, FindingsCommands, MembersCommands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp_millis().init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init { region, force } => cli::init::run(&opts, &region, force),
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("hubpoll version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Findings(FindingsCommands::List {
            filters,
            pagination,
        }) => cli::findings::list(&opts, &filters, &pagination).await,
        Commands::Members(members_cmd) => match members_cmd {
            MembersCommands::List {
                only_associated,
                pagination,
            } => cli::members::list(&opts, only_associated, &pagination).await,
            MembersCommands::Get { account_ids } => cli::members::get(&opts, &account_ids).await,
        },
        Commands::Fetch {
            severity,
            include_archived,
            archive,
            dry_run,
        } => {
            let overrides = FetchOverrides {
                severity,
                include_archived,
                archive,
                dry_run,
            };
            cli::fetch::run(&opts, &overrides).await
        }
        Commands::TagResource { resource_arn, tags } => {
            cli::tag::run(&opts, &resource_arn, &tags).await
        }
    }
}
