//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod finding;
mod incident;
mod member;

pub use finding::FindingDisplay;
pub use incident::IncidentDisplay;
pub use member::MemberDisplay;
