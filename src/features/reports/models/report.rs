use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Report status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Resolved,
}

impl ReportStatus {
    /// The only legal transitions are pending -> in_progress -> resolved.
    pub fn can_advance_to(self, target: ReportStatus) -> bool {
        target.predecessor() == Some(self)
    }

    /// The status a report must currently hold for `self` to be a legal
    /// target. `None` means `self` is never a valid target (initial state).
    pub fn predecessor(self) -> Option<ReportStatus> {
        match self {
            ReportStatus::Pending => None,
            ReportStatus::InProgress => Some(ReportStatus::Pending),
            ReportStatus::Resolved => Some(ReportStatus::InProgress),
        }
    }

    #[allow(dead_code)]
    pub fn is_terminal(self) -> bool {
        matches!(self, ReportStatus::Resolved)
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pending => write!(f, "pending"),
            ReportStatus::InProgress => write!(f, "in_progress"),
            ReportStatus::Resolved => write!(f, "resolved"),
        }
    }
}

/// Report type enum matching database enum. Fixed at submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Emergency,
    NonEmergency,
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportType::Emergency => write!(f, "emergency"),
            ReportType::NonEmergency => write!(f, "non_emergency"),
        }
    }
}

/// Database model for report
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[sqlx(rename = "type")]
    pub report_type: ReportType,
    pub status: ReportStatus,
    pub category_id: Uuid,
    pub subcategory_id: Option<Uuid>,
    pub location_address: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub image_refs: Vec<String>,
    pub assigned_officer_id: Option<Uuid>,
    pub resolution_details: Option<String>,
    pub reporter_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new report; the reporter comes from the caller's
/// authenticated identity, never from the draft
#[derive(Debug)]
pub struct CreateReport {
    pub title: String,
    pub description: String,
    pub report_type: ReportType,
    pub category_id: Uuid,
    pub subcategory_id: Option<Uuid>,
    pub location_address: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub image_refs: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ReportStatus; 3] = [
        ReportStatus::Pending,
        ReportStatus::InProgress,
        ReportStatus::Resolved,
    ];

    #[test]
    fn transition_table_is_exactly_two_edges() {
        for from in ALL {
            for to in ALL {
                let legal = matches!(
                    (from, to),
                    (ReportStatus::Pending, ReportStatus::InProgress)
                        | (ReportStatus::InProgress, ReportStatus::Resolved)
                );
                assert_eq!(
                    from.can_advance_to(to),
                    legal,
                    "unexpected verdict for {} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn resolved_is_terminal() {
        assert!(ReportStatus::Resolved.is_terminal());
        for to in ALL {
            assert!(!ReportStatus::Resolved.can_advance_to(to));
        }
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ReportStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&ReportType::NonEmergency).unwrap(),
            "\"non_emergency\""
        );
    }

    #[test]
    fn status_deserializes_canonical_form_only() {
        assert!(serde_json::from_str::<ReportType>("\"non_emergency\"").is_ok());
        // The dashed variant seen in legacy data is not accepted; callers
        // must normalize at the boundary.
        assert!(serde_json::from_str::<ReportType>("\"non-emergency\"").is_err());
    }
}
