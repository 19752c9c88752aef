//! Incident display model

use serde::Serialize;
use tabled::Tabled;

use crate::fetch::Incident;
use crate::output::formatters::truncate_string;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct IncidentDisplay {
    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "OCCURRED")]
    pub occurred: String,

    /// 1-4 with its label
    #[tabled(rename = "SEVERITY")]
    pub severity: String,
}

impl From<&Incident> for IncidentDisplay {
    fn from(incident: &Incident) -> Self {
        let label = match incident.severity {
            4 => "Critical",
            3 => "High",
            2 => "Medium",
            _ => "Low",
        };

        Self {
            name: truncate_string(&incident.name, 60),
            occurred: incident.occurred.clone(),
            severity: format!("{} ({})", incident.severity, label),
        }
    }
}
