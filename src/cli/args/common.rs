//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - readable rendering (global default)
    #[default]
    Table,
    /// JSON format - structured output keyed by context path
    Json,
}
