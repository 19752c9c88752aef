//! Resource tagging

use std::collections::BTreeMap;

use log::info;

use crate::client::SecurityHubApi;
use crate::error::{Error, Result};
use crate::parse::parse_tag_field;

/// Tag a Security Hub resource from `key=..,value=..;...` text.
///
/// Later groups with the same key win. Returns the tags that were applied.
pub async fn tag_resource_command<C>(
    client: &C,
    resource_arn: &str,
    tags: &str,
) -> Result<BTreeMap<String, String>>
where
    C: SecurityHubApi + ?Sized,
{
    let tags: BTreeMap<String, String> = parse_tag_field(tags)
        .into_iter()
        .map(|tag| (tag.key, tag.value))
        .collect();

    if tags.is_empty() {
        return Err(Error::InvalidArgument(
            "no tags given; expected key=<k>,value=<v>[;...]".to_string(),
        ));
    }

    client.tag_resource(resource_arn, &tags).await?;
    info!("Tagged {} with {} tag(s)", resource_arn, tags.len());

    Ok(tags)
}
