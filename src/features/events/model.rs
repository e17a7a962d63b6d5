use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::features::reports::dtos::ReportResponseDto;
use crate::features::reports::models::Report;

/// Mutation kinds emitted by the lifecycle controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportEventKind {
    Created,
    StatusChanged,
    OfficerAssigned,
    ResolutionAttached,
}

/// A committed report mutation, published after the store write returns so
/// subscribers observe per-report events in commit order.
///
/// Carries the full post-mutation snapshot; views are still expected to
/// re-run their query on receipt rather than patch local state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEvent {
    pub kind: ReportEventKind,
    pub report: ReportResponseDto,
    pub occurred_at: DateTime<Utc>,
}

impl ReportEvent {
    pub fn new(kind: ReportEventKind, report: Report) -> Self {
        Self {
            kind,
            report: report.into(),
            occurred_at: Utc::now(),
        }
    }

    #[allow(dead_code)]
    pub fn report_id(&self) -> Uuid {
        self.report.id
    }

    pub fn reporter_id(&self) -> Uuid {
        self.report.reporter_id
    }
}

/// Visibility scope of one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionScope {
    /// Admin views: every report mutation.
    AllReports,
    /// Citizen views: only mutations of the subscriber's own reports.
    Reporter(Uuid),
}

impl SubscriptionScope {
    pub fn matches(&self, event: &ReportEvent) -> bool {
        match self {
            SubscriptionScope::AllReports => true,
            SubscriptionScope::Reporter(user_id) => event.reporter_id() == *user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::{ReportStatus, ReportType};

    fn event_for_reporter(reporter_id: Uuid) -> ReportEvent {
        let report = Report {
            id: Uuid::new_v4(),
            title: "Streetlight out".to_string(),
            description: "Dark corner at 5th and Main".to_string(),
            report_type: ReportType::NonEmergency,
            status: ReportStatus::Pending,
            category_id: Uuid::new_v4(),
            subcategory_id: None,
            location_address: None,
            location_lat: None,
            location_lng: None,
            image_refs: vec![],
            assigned_officer_id: None,
            resolution_details: None,
            reporter_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        ReportEvent::new(ReportEventKind::Created, report)
    }

    #[test]
    fn admin_scope_matches_everything() {
        let event = event_for_reporter(Uuid::new_v4());
        assert!(SubscriptionScope::AllReports.matches(&event));
    }

    #[test]
    fn citizen_scope_only_matches_own_reports() {
        let me = Uuid::new_v4();
        let mine = event_for_reporter(me);
        let theirs = event_for_reporter(Uuid::new_v4());

        let scope = SubscriptionScope::Reporter(me);
        assert!(scope.matches(&mine));
        assert!(!scope.matches(&theirs));
    }

    #[test]
    fn kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ReportEventKind::StatusChanged).unwrap(),
            "\"status_changed\""
        );
    }
}
