use log::debug;

use super::groups;
use crate::client::models::{FilterSpec, StringFilter};

/// Parse `name=..,value=..,comparison=..` groups into a [`FilterSpec`].
///
/// Keys may appear in any order within a group. `Comparison` is upper-cased,
/// `Value` is kept verbatim. Groups sharing a name accumulate in input order.
/// Groups that are malformed or miss one of the three keys are skipped.
pub fn parse_filter_field(text: &str) -> FilterSpec {
    let mut filters = FilterSpec::new();

    for (raw, parsed) in groups(text) {
        let Some(fields) = parsed else {
            debug!("could not parse filter group: {:?}", raw);
            continue;
        };

        let (Some(name), Some(value), Some(comparison)) = (
            fields.get("name"),
            fields.get("value"),
            fields.get("comparison"),
        ) else {
            debug!("filter group is missing name, value or comparison: {:?}", raw);
            continue;
        };

        filters
            .entry((*name).to_string())
            .or_default()
            .push(StringFilter {
                value: (*value).to_string(),
                comparison: comparison.to_uppercase(),
            });
    }

    filters
}
