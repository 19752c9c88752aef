//! Security Hub data models
//!
//! Models are organized by resource type. Attributes hubpoll does not read
//! are preserved rather than dropped: findings keep the record as sent,
//! members carry an `extra` map.

mod filter;
mod finding;
mod member;
mod request;

pub use filter::{
    DateFilter, FilterCondition, FilterSpec, FindingFilters, NumberFilter, StringFilter, Tag,
    TagSpec, extend_filters, push_filter,
};
pub use finding::{Finding, Severity, Workflow, label_for_normalized};
pub use member::{GetMembersResponse, ListMembersResponse, Member, RawMember, UnprocessedAccount};
pub use request::{
    GetFindingsRequest, GetFindingsResponse, ListMembersRequest, SortCriterion, SortOrder,
    UpdateFindingsRequest,
};
