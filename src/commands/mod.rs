//! Security Hub commands
//!
//! Each command takes any [`SecurityHubApi`](crate::client::SecurityHubApi)
//! implementation and returns its readable rendering, its structured output,
//! and the underlying data.

pub mod findings;
pub mod members;
pub mod tags;

pub use findings::{FindingsQuery, get_findings_command};
pub use members::{get_members_command, list_members_command};
pub use tags::tag_resource_command;
