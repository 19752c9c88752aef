//! Pagination argument types for CLI commands

use clap::Args;

/// Shared paging arguments for list commands.
///
/// Flatten this into any command that pages through results:
/// ```ignore
/// List {
///     #[command(flatten)]
///     pagination: PaginationArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct PaginationArgs {
    /// Maximum results per page (1-100)
    #[arg(long, short = 'n', value_parser = clap::value_parser!(u32).range(1..=100))]
    pub max_results: Option<u32>,

    /// Continue from a token returned by an earlier call
    #[arg(long)]
    pub next_token: Option<String>,
}
