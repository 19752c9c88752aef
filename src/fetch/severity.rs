//! Severity thresholds and incident severity mapping

use serde::{Deserialize, Serialize};

use crate::client::models::Finding;

/// Minimum severity of findings pulled in by a poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SeverityFloor {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityFloor {
    /// Lowest normalized score (0-100) included at this floor.
    pub fn normalized_floor(self) -> u32 {
        match self {
            SeverityFloor::Low => 1,
            SeverityFloor::Medium => 31,
            SeverityFloor::High => 71,
            SeverityFloor::Critical => 91,
        }
    }
}

/// Incident severity on the 1 (low) to 4 (critical) scale.
///
/// Uses the finding's label when present, otherwise its normalized score.
/// Findings with no severity at all are treated as low.
pub fn incident_severity(finding: &Finding) -> u8 {
    let Some(severity) = finding.severity.as_ref() else {
        return 1;
    };

    if let Some(label) = severity.label.as_deref() {
        match label.to_ascii_uppercase().as_str() {
            "CRITICAL" => return 4,
            "HIGH" => return 3,
            "MEDIUM" => return 2,
            "LOW" | "INFORMATIONAL" => return 1,
            _ => {}
        }
    }

    match finding.normalized_severity().unwrap_or(0) {
        0..=39 => 1,
        40..=69 => 2,
        70..=89 => 3,
        _ => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures;
    use crate::client::models::Severity;

    #[test]
    fn test_normalized_floor() {
        assert_eq!(SeverityFloor::Low.normalized_floor(), 1);
        assert_eq!(SeverityFloor::Medium.normalized_floor(), 31);
        assert_eq!(SeverityFloor::High.normalized_floor(), 71);
        assert_eq!(SeverityFloor::Critical.normalized_floor(), 91);
    }

    #[test]
    fn test_floor_deserializes_lowercase() {
        let floor: SeverityFloor = serde_yaml::from_str("high").unwrap();
        assert_eq!(floor, SeverityFloor::High);
    }

    #[test]
    fn test_incident_severity_from_normalized() {
        assert_eq!(incident_severity(&fixtures::finding("a", "2021-01-01T00:00:00Z", 0)), 1);
        assert_eq!(incident_severity(&fixtures::finding("b", "2021-01-01T00:00:00Z", 40)), 2);
        assert_eq!(incident_severity(&fixtures::finding("c", "2021-01-01T00:00:00Z", 75)), 3);
        assert_eq!(incident_severity(&fixtures::finding("d", "2021-01-01T00:00:00Z", 100)), 4);
    }

    #[test]
    fn test_incident_severity_prefers_label() {
        let mut finding = fixtures::finding("a", "2021-01-01T00:00:00Z", 10);
        finding.severity = Some(Severity {
            label: Some("critical".to_string()),
            normalized: Some(10),
            ..Default::default()
        });
        assert_eq!(incident_severity(&finding), 4);
    }

    #[test]
    fn test_incident_severity_without_severity_block() {
        let mut finding = fixtures::finding("a", "2021-01-01T00:00:00Z", 10);
        finding.severity = None;
        assert_eq!(incident_severity(&finding), 1);
    }
}
