use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::catalog::CatalogService;
use crate::features::events::{EventBus, ReportEvent, ReportEventKind};
use crate::features::officers::OfficerService;
use crate::features::reports::models::{CreateReport, Report, ReportStatus};
use crate::shared::constants::MAX_IMAGE_REFS;
use crate::shared::validation::MEDIA_REF_REGEX;

const REPORT_COLUMNS: &str = "id, title, description, type, status, category_id, \
     subcategory_id, location_address, location_lat, location_lng, image_refs, \
     assigned_officer_id, resolution_details, reporter_id, created_at, updated_at";

/// The one mutation path for reports. Every write goes through here so the
/// transition rules cannot be bypassed, and every committed write is
/// published on the event bus.
pub struct LifecycleService {
    pool: PgPool,
    catalog: Arc<CatalogService>,
    officers: Arc<OfficerService>,
    bus: Arc<EventBus>,
}

impl LifecycleService {
    pub fn new(
        pool: PgPool,
        catalog: Arc<CatalogService>,
        officers: Arc<OfficerService>,
        bus: Arc<EventBus>,
    ) -> Self {
        Self {
            pool,
            catalog,
            officers,
            bus,
        }
    }

    /// Submit a new report. Starts at `pending`, unassigned.
    ///
    /// Not idempotent on retry: resubmission creates a duplicate, and
    /// double-submit prevention is the caller's responsibility.
    pub async fn submit(&self, reporter: &AuthenticatedUser, data: CreateReport) -> Result<Report> {
        self.validate_draft(&data).await?;
        self.ensure_reporter(reporter).await?;

        let report = sqlx::query_as::<_, Report>(&format!(
            r#"
            INSERT INTO reports (
                title, description, type, category_id, subcategory_id,
                location_address, location_lat, location_lng, image_refs, reporter_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            REPORT_COLUMNS
        ))
        .bind(data.title.trim())
        .bind(data.description.trim())
        .bind(data.report_type)
        .bind(data.category_id)
        .bind(data.subcategory_id)
        .bind(&data.location_address)
        .bind(data.location_lat)
        .bind(data.location_lng)
        .bind(&data.image_refs)
        .bind(reporter.id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create report: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Created report: {} by reporter: {}",
            report.id,
            report.reporter_id
        );

        self.bus
            .publish(ReportEvent::new(ReportEventKind::Created, report.clone()));

        Ok(report)
    }

    /// Advance a report's status. Legal moves are exactly
    /// pending -> in_progress and in_progress -> resolved.
    ///
    /// The precondition is enforced in the UPDATE itself (`WHERE status =`),
    /// so two racing calls cannot both win: the loser's update matches zero
    /// rows and is reported against the freshly read state.
    pub async fn advance_status(&self, id: Uuid, target: ReportStatus) -> Result<Report> {
        let Some(expected) = target.predecessor() else {
            let current = self.current(id).await?;
            return Err(AppError::IllegalTransition {
                from: current.status,
                to: target,
            });
        };

        let updated = sqlx::query_as::<_, Report>(&format!(
            r#"
            UPDATE reports
            SET status = $1, updated_at = NOW()
            WHERE id = $2 AND status = $3
            RETURNING {}
            "#,
            REPORT_COLUMNS
        ))
        .bind(target)
        .bind(id)
        .bind(expected)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update report status: {:?}", e);
            AppError::Database(e)
        })?;

        match updated {
            Some(report) => {
                tracing::info!("Report {} moved to {}", report.id, report.status);
                self.bus.publish(ReportEvent::new(
                    ReportEventKind::StatusChanged,
                    report.clone(),
                ));
                Ok(report)
            }
            None => {
                let current = self.current(id).await?;
                Err(AppError::IllegalTransition {
                    from: current.status,
                    to: target,
                })
            }
        }
    }

    /// Set or clear the assigned officer. Allowed in any status; clearing
    /// an already-unassigned report is a no-op, not an error.
    pub async fn assign_officer(&self, id: Uuid, officer_id: Option<Uuid>) -> Result<Report> {
        if let Some(officer_id) = officer_id {
            self.officers.get_by_id(officer_id).await?;
        }

        let report = sqlx::query_as::<_, Report>(&format!(
            r#"
            UPDATE reports
            SET assigned_officer_id = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {}
            "#,
            REPORT_COLUMNS
        ))
        .bind(officer_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to assign officer: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        tracing::info!(
            "Report {} officer assignment set to {:?}",
            report.id,
            report.assigned_officer_id
        );

        self.bus.publish(ReportEvent::new(
            ReportEventKind::OfficerAssigned,
            report.clone(),
        ));

        Ok(report)
    }

    /// Attach resolution details. Meaningful once resolved, but permitted
    /// in any status so partial updates cannot lock an admin out.
    pub async fn attach_resolution(&self, id: Uuid, details: &str) -> Result<Report> {
        if details.trim().is_empty() {
            return Err(AppError::Validation(
                "resolution_details: must not be empty".to_string(),
            ));
        }

        let report = sqlx::query_as::<_, Report>(&format!(
            r#"
            UPDATE reports
            SET resolution_details = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {}
            "#,
            REPORT_COLUMNS
        ))
        .bind(details.trim())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to attach resolution: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        tracing::info!("Report {} resolution details attached", report.id);

        self.bus.publish(ReportEvent::new(
            ReportEventKind::ResolutionAttached,
            report.clone(),
        ));

        Ok(report)
    }

    /// Mirror the authenticated identity into the users table so the
    /// reporter reference resolves. Identity is trusted from the token.
    async fn ensure_reporter(&self, reporter: &AuthenticatedUser) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (id)
            DO UPDATE SET name = EXCLUDED.name, role = EXCLUDED.role
            "#,
        )
        .bind(reporter.id)
        .bind(&reporter.name)
        .bind(reporter.role)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert reporter: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(())
    }

    /// Draft validation: field checks first, then referential consistency
    /// against the catalog.
    async fn validate_draft(&self, data: &CreateReport) -> Result<()> {
        validate_fields(data)?;

        self.catalog.get_category(data.category_id).await?;

        if let Some(subcategory_id) = data.subcategory_id {
            let subcategory = self.catalog.get_subcategory(subcategory_id).await?;
            if subcategory.category_id != data.category_id {
                return Err(AppError::InconsistentReference(format!(
                    "Subcategory {} does not belong to category {}",
                    subcategory_id, data.category_id
                )));
            }
        }

        Ok(())
    }

    async fn current(&self, id: Uuid) -> Result<Report> {
        sqlx::query_as::<_, Report>(&format!(
            "SELECT {} FROM reports WHERE id = $1",
            REPORT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get report: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }
}

/// Field-level draft checks, independent of the store
fn validate_fields(data: &CreateReport) -> Result<()> {
    if data.title.trim().is_empty() {
        return Err(AppError::Validation(
            "title: must not be empty".to_string(),
        ));
    }
    if data.description.trim().is_empty() {
        return Err(AppError::Validation(
            "description: must not be empty".to_string(),
        ));
    }
    if data.image_refs.len() > MAX_IMAGE_REFS {
        return Err(AppError::Validation(format!(
            "image_refs: at most {} images are allowed",
            MAX_IMAGE_REFS
        )));
    }
    if let Some(bad) = data
        .image_refs
        .iter()
        .find(|r| !MEDIA_REF_REGEX.is_match(r))
    {
        return Err(AppError::Validation(format!(
            "image_refs: invalid media reference '{}'",
            bad
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::ReportType;

    fn draft() -> CreateReport {
        CreateReport {
            title: "Pothole".to_string(),
            description: "Deep pothole near the school".to_string(),
            report_type: ReportType::NonEmergency,
            category_id: Uuid::new_v4(),
            subcategory_id: None,
            location_address: None,
            location_lat: None,
            location_lng: None,
            image_refs: vec!["uploads/a.jpg".to_string()],
        }
    }

    #[test]
    fn valid_draft_passes_field_checks() {
        assert!(validate_fields(&draft()).is_ok());
    }

    #[test]
    fn whitespace_only_title_is_rejected() {
        let mut data = draft();
        data.title = "   ".to_string();
        assert!(matches!(
            validate_fields(&data),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn whitespace_only_description_is_rejected() {
        let mut data = draft();
        data.description = "\t\n".to_string();
        assert!(matches!(
            validate_fields(&data),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn sixth_image_is_rejected() {
        let mut data = draft();
        data.image_refs = (0..6).map(|i| format!("uploads/{}.jpg", i)).collect();
        assert!(matches!(
            validate_fields(&data),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn malformed_media_ref_is_rejected() {
        let mut data = draft();
        data.image_refs = vec!["/absolute/path.jpg".to_string()];
        assert!(matches!(
            validate_fields(&data),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn no_images_is_fine() {
        let mut data = draft();
        data.image_refs = vec![];
        assert!(validate_fields(&data).is_ok());
    }
}
