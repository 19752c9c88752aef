//! Filter and tag shapes shared by the findings and tagging endpoints

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// String comparison against a finding attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StringFilter {
    /// Value to compare against
    pub value: String,

    /// Comparison operator (EQUALS, PREFIX, NOT_EQUALS, PREFIX_NOT_EQUALS, ...)
    pub comparison: String,
}

impl StringFilter {
    pub fn equals(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            comparison: "EQUALS".to_string(),
        }
    }

    pub fn prefix(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            comparison: "PREFIX".to_string(),
        }
    }
}

/// Numeric range filter. Unset bounds are omitted from the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NumberFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub eq: Option<f64>,
}

/// Timestamp range filter with ISO-8601 bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DateFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// One condition in a `Filters` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterCondition {
    String(StringFilter),
    Number(NumberFilter),
    Date(DateFilter),
}

impl From<StringFilter> for FilterCondition {
    fn from(filter: StringFilter) -> Self {
        FilterCondition::String(filter)
    }
}

impl From<NumberFilter> for FilterCondition {
    fn from(filter: NumberFilter) -> Self {
        FilterCondition::Number(filter)
    }
}

impl From<DateFilter> for FilterCondition {
    fn from(filter: DateFilter) -> Self {
        FilterCondition::Date(filter)
    }
}

/// Parsed `name=..,value=..,comparison=..` groups keyed by filter name.
pub type FilterSpec = BTreeMap<String, Vec<StringFilter>>;

/// The `Filters` object sent with findings requests.
pub type FindingFilters = BTreeMap<String, Vec<FilterCondition>>;

/// Append a condition under `name`, keeping any conditions already present.
pub fn push_filter(filters: &mut FindingFilters, name: &str, condition: impl Into<FilterCondition>) {
    filters
        .entry(name.to_string())
        .or_default()
        .push(condition.into());
}

/// Merge a parsed filter spec into request filters.
pub fn extend_filters(filters: &mut FindingFilters, spec: FilterSpec) {
    for (name, conditions) in spec {
        let entry = filters.entry(name).or_default();
        entry.extend(conditions.into_iter().map(FilterCondition::from));
    }
}

/// Resource tag in `{Key, Value}` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// Parsed `key=..,value=..` groups in input order.
pub type TagSpec = Vec<Tag>;
