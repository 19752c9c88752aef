/// Split a comma-separated id list, trimming whitespace and dropping empties.
pub fn parse_resource_ids(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
