//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod formatters;
pub mod json;
pub mod results;
pub mod table;

pub use results::StructuredOutput;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;

    /// Format and print to stdout
    fn print(&self, format: OutputFormat) -> Result<()> {
        println!("{}", self.format(format)?);
        Ok(())
    }
}

impl<T: Tabled + Serialize> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(table::format_table(self)),
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

/// Print a command's readable rendering (table format) or its entry context
/// (JSON format).
pub fn print_command(readable: &str, output: &StructuredOutput, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", readable),
        OutputFormat::Json => println!("{}", json::format_json(&output.to_context())?),
    }
    Ok(())
}
