use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pipeline stage of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    InProgress,
    Qualified,
    Unqualified,
    Converted,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::InProgress => "in_progress",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Unqualified => "unqualified",
            LeadStatus::Converted => "converted",
        }
    }

    /// A lead that can still move through the pipeline.
    pub fn is_open(&self) -> bool {
        !matches!(self, LeadStatus::Unqualified | LeadStatus::Converted)
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,
    pub organization: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: LeadStatus,
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Payload for creating a lead.
#[derive(Debug, Clone, Serialize)]
pub struct NewLead {
    pub organization: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Partial update for a lead; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeadPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Kind of interaction recorded against a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Call,
    Email,
    Meeting,
    Note,
    Proposal,
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ActivityType::Call => "call",
            ActivityType::Email => "email",
            ActivityType::Meeting => "meeting",
            ActivityType::Note => "note",
            ActivityType::Proposal => "proposal",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub lead: i64,
    pub activity_type: ActivityType,
    pub note: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewActivity {
    pub activity_type: ActivityType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lead_with_status() {
        let json = r#"{
            "id": 12,
            "organization": 1,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "phone": null,
            "company": "Analytical Engines Ltd",
            "status": "in_progress",
            "source": "referral",
            "created_at": "2026-03-10T08:00:00Z",
            "updated_at": "2026-03-12T16:45:00Z"
        }"#;
        let lead: Lead = serde_json::from_str(json).unwrap();
        assert_eq!(lead.status, LeadStatus::InProgress);
        assert!(lead.status.is_open());
        assert_eq!(lead.full_name(), "Ada Lovelace");
    }

    #[test]
    fn converted_and_unqualified_are_closed() {
        assert!(!LeadStatus::Converted.is_open());
        assert!(!LeadStatus::Unqualified.is_open());
        assert!(LeadStatus::New.is_open());
        assert!(LeadStatus::Qualified.is_open());
    }

    #[test]
    fn patch_skips_unset_fields() {
        let patch = LeadPatch {
            status: Some(LeadStatus::Qualified),
            ..Default::default()
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"status":"qualified"}"#);
    }

    #[test]
    fn activity_type_serde_uses_lowercase() {
        let activity = NewActivity {
            activity_type: ActivityType::Meeting,
            note: Some("Kickoff call scheduled".to_string()),
        };
        let json = serde_json::to_string(&activity).unwrap();
        assert_eq!(
            json,
            r#"{"activity_type":"meeting","note":"Kickoff call scheduled"}"#
        );
    }
}
