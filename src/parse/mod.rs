//! Parsers for the delimited argument encodings
//!
//! Playbook arguments arrive as flat strings:
//! - filters: `name=<n>,value=<v>,comparison=<c>[;name=...]`
//! - tags: `key=<k>,value=<v>[;key=...]`
//! - resource ids: `a, b, c`
//!
//! Malformed groups are skipped with a debug log and never raise an error;
//! wholly malformed input parses to an empty result.

use std::collections::HashMap;

mod filter;
mod resource_ids;
mod tag;

pub use filter::parse_filter_field;
pub use resource_ids::parse_resource_ids;
pub use tag::parse_tag_field;

/// Split `text` into its semicolon-delimited groups, parsing each into a
/// key/value map. Groups containing a piece without `=` yield `None`.
fn groups(text: &str) -> impl Iterator<Item = (&str, Option<HashMap<&str, &str>>)> {
    text.split(';').map(|group| (group, assignments(group)))
}

/// Parse one `k=v,k=v` group. Keys are trimmed, values are kept verbatim.
fn assignments(group: &str) -> Option<HashMap<&str, &str>> {
    group
        .split(',')
        .map(|piece| {
            piece
                .split_once('=')
                .map(|(key, value)| (key.trim(), value))
        })
        .collect()
}
