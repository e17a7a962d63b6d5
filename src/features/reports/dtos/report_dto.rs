use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::{Report, ReportStatus, ReportType};

/// Response DTO for report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
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

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            title: r.title,
            description: r.description,
            report_type: r.report_type,
            status: r.status,
            category_id: r.category_id,
            subcategory_id: r.subcategory_id,
            location_address: r.location_address,
            location_lat: r.location_lat,
            location_lng: r.location_lng,
            image_refs: r.image_refs,
            assigned_officer_id: r.assigned_officer_id,
            resolution_details: r.resolution_details,
            reporter_id: r.reporter_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Request DTO for submitting a report
///
/// Field-level constraints live here; referential checks (category,
/// subcategory, media reference format) are the lifecycle controller's job.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitReportDto {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    pub description: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub category_id: Uuid,
    pub subcategory_id: Option<Uuid>,
    pub location_address: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    #[serde(default)]
    #[validate(length(max = 5, message = "At most 5 images are allowed"))]
    pub image_refs: Vec<String>,
}

/// Request DTO for advancing report status
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdvanceStatusDto {
    pub status: ReportStatus,
}

/// Request DTO for assigning an officer; `null` unassigns
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignOfficerDto {
    pub officer_id: Option<Uuid>,
}

/// Request DTO for attaching resolution details
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AttachResolutionDto {
    #[validate(length(min = 1, max = 5000, message = "Resolution details are required"))]
    pub resolution_details: String,
}

/// Response DTO for per-bucket report counts
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportStatsDto {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub resolved: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_dto() -> SubmitReportDto {
        SubmitReportDto {
            title: "Pothole".to_string(),
            description: "Deep pothole near the school".to_string(),
            report_type: ReportType::NonEmergency,
            category_id: Uuid::new_v4(),
            subcategory_id: None,
            location_address: Some("5th and Main".to_string()),
            location_lat: None,
            location_lng: None,
            image_refs: vec!["uploads/a.jpg".to_string()],
        }
    }

    #[test]
    fn valid_submission_passes() {
        assert!(valid_dto().validate().is_ok());
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut dto = valid_dto();
        dto.title = String::new();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn empty_description_is_rejected() {
        let mut dto = valid_dto();
        dto.description = String::new();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn more_than_five_images_rejected() {
        let mut dto = valid_dto();
        dto.image_refs = (0..6).map(|i| format!("uploads/{}.jpg", i)).collect();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn five_images_allowed() {
        let mut dto = valid_dto();
        dto.image_refs = (0..5).map(|i| format!("uploads/{}.jpg", i)).collect();
        assert!(dto.validate().is_ok());
    }
}
