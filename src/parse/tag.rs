use log::debug;

use super::groups;
use crate::client::models::{Tag, TagSpec};

/// Parse `key=..,value=..` groups into a [`TagSpec`], preserving case and order.
pub fn parse_tag_field(text: &str) -> TagSpec {
    let mut tags = TagSpec::new();

    for (raw, parsed) in groups(text) {
        let Some(fields) = parsed else {
            debug!("could not parse tag group: {:?}", raw);
            continue;
        };

        let (Some(key), Some(value)) = (fields.get("key"), fields.get("value")) else {
            debug!("tag group is missing key or value: {:?}", raw);
            continue;
        };

        tags.push(Tag {
            key: (*key).to_string(),
            value: (*value).to_string(),
        });
    }

    tags
}
