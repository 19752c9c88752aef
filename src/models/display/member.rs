//! Member account display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Member;
use crate::output::formatters::or_dash;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MemberDisplay {
    #[tabled(rename = "ACCOUNT ID")]
    pub account_id: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "ADMINISTRATOR")]
    pub administrator_id: String,

    #[tabled(rename = "INVITED")]
    pub invited_at: String,

    #[tabled(rename = "UPDATED")]
    pub updated_at: String,
}

impl From<&Member> for MemberDisplay {
    fn from(member: &Member) -> Self {
        Self {
            account_id: or_dash(member.account_id.as_deref()),
            email: or_dash(member.email.as_deref()),
            status: or_dash(member.member_status.as_deref()),
            administrator_id: or_dash(member.administrator_id.as_deref()),
            invited_at: or_dash(member.invited_at.as_deref()),
            updated_at: or_dash(member.updated_at.as_deref()),
        }
    }
}
