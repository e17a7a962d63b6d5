use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{Report, ReportStatus, ReportType};

/// Role-derived visibility restriction applied to every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryScope {
    /// Admin views: all reports.
    Admin,
    /// Citizen views: only reports submitted by this user.
    Citizen(Uuid),
}

/// Named status filter shown as a tab in the views.
///
/// `pending` is a union bucket: triage must see in-progress work alongside
/// untouched reports. `resolved` is exact-match. The asymmetry is load-
/// bearing; both the SQL predicate and [`matches`](StatusBucket::matches)
/// encode it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    Pending,
    Resolved,
}

impl StatusBucket {
    /// Event-side counterpart of the SQL predicate.
    #[allow(dead_code)]
    pub fn matches(self, status: ReportStatus) -> bool {
        match self {
            StatusBucket::Pending => {
                matches!(status, ReportStatus::Pending | ReportStatus::InProgress)
            }
            StatusBucket::Resolved => status == ReportStatus::Resolved,
        }
    }

    fn sql_predicate(self) -> &'static str {
        match self {
            StatusBucket::Pending => "status IN ('pending', 'in_progress')",
            StatusBucket::Resolved => "status = 'resolved'",
        }
    }
}

/// Filter specification; all populated dimensions compose with AND.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFilter {
    pub status_bucket: Option<StatusBucket>,
    pub report_type: Option<ReportType>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, FromRow)]
pub struct ReportStats {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub resolved: i64,
}

const REPORT_COLUMNS: &str = "id, title, description, type, status, category_id, \
     subcategory_id, location_address, location_lat, location_lng, image_refs, \
     assigned_officer_id, resolution_details, reporter_id, created_at, updated_at";

/// Read side of the report store: scoped, filtered, deterministically
/// ordered result sets. Reads are idempotent and safe to retry.
pub struct QueryService {
    pool: PgPool,
}

impl QueryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run a scoped, filtered query, newest first (ties broken by id)
    pub async fn query(&self, scope: QueryScope, filter: ReportFilter) -> Result<Vec<Report>> {
        let mut qb = build_query(scope, filter);

        qb.build_query_as::<Report>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to query reports: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Get one report, subject to the same visibility rules as `query`.
    /// A citizen asking for another reporter's record gets `NotFound`.
    pub async fn get_scoped(&self, id: Uuid, scope: QueryScope) -> Result<Report> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM reports WHERE id = ", REPORT_COLUMNS));
        qb.push_bind(id);
        if let QueryScope::Citizen(user_id) = scope {
            qb.push(" AND reporter_id = ");
            qb.push_bind(user_id);
        }

        qb.build_query_as::<Report>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get report: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    /// Per-bucket counts for the dashboard header, same scope rules
    pub async fn stats(&self, scope: QueryScope) -> Result<ReportStats> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'in_progress') AS in_progress,
                COUNT(*) FILTER (WHERE status = 'resolved') AS resolved
            FROM reports
            "#,
        );
        if let QueryScope::Citizen(user_id) = scope {
            qb.push(" WHERE reporter_id = ");
            qb.push_bind(user_id);
        }

        qb.build_query_as::<ReportStats>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to compute report stats: {:?}", e);
                AppError::Database(e)
            })
    }
}

/// Assemble the filtered list query. Split out so the predicate assembly is
/// testable without a database.
fn build_query(scope: QueryScope, filter: ReportFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("SELECT {} FROM reports WHERE TRUE", REPORT_COLUMNS));

    if let QueryScope::Citizen(user_id) = scope {
        qb.push(" AND reporter_id = ");
        qb.push_bind(user_id);
    }

    if let Some(bucket) = filter.status_bucket {
        qb.push(" AND ");
        qb.push(bucket.sql_predicate());
    }

    if let Some(report_type) = filter.report_type {
        qb.push(" AND type = ");
        qb.push_bind(report_type);
    }

    if let Some(category_id) = filter.category_id {
        qb.push(" AND category_id = ");
        qb.push_bind(category_id);
    }

    qb.push(" ORDER BY created_at DESC, id DESC");
    qb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_bucket_is_a_union() {
        assert!(StatusBucket::Pending.matches(ReportStatus::Pending));
        assert!(StatusBucket::Pending.matches(ReportStatus::InProgress));
        assert!(!StatusBucket::Pending.matches(ReportStatus::Resolved));
    }

    #[test]
    fn resolved_bucket_is_exact() {
        assert!(StatusBucket::Resolved.matches(ReportStatus::Resolved));
        assert!(!StatusBucket::Resolved.matches(ReportStatus::Pending));
        assert!(!StatusBucket::Resolved.matches(ReportStatus::InProgress));
    }

    #[test]
    fn sql_predicate_agrees_with_matches() {
        // The SQL bucket filter and the event-side predicate must not drift.
        assert_eq!(
            StatusBucket::Pending.sql_predicate(),
            "status IN ('pending', 'in_progress')"
        );
        assert_eq!(StatusBucket::Resolved.sql_predicate(), "status = 'resolved'");
    }

    #[test]
    fn admin_query_without_filters_is_unrestricted() {
        let qb = build_query(QueryScope::Admin, ReportFilter::default());
        let sql = qb.sql();
        assert!(!sql.contains("reporter_id"));
        assert!(!sql.contains("category_id ="));
        assert!(sql.ends_with("ORDER BY created_at DESC, id DESC"));
    }

    #[test]
    fn citizen_scope_restricts_reporter() {
        let qb = build_query(QueryScope::Citizen(Uuid::new_v4()), ReportFilter::default());
        assert!(qb.sql().contains("reporter_id = $1"));
    }

    #[test]
    fn filters_compose_with_and() {
        let filter = ReportFilter {
            status_bucket: Some(StatusBucket::Pending),
            report_type: Some(ReportType::Emergency),
            category_id: Some(Uuid::new_v4()),
        };
        let qb = build_query(QueryScope::Citizen(Uuid::new_v4()), filter);
        let sql = qb.sql();
        assert!(sql.contains("reporter_id = $1"));
        assert!(sql.contains("status IN ('pending', 'in_progress')"));
        assert!(sql.contains("type = $2"));
        assert!(sql.contains("category_id = $3"));
    }

    #[test]
    fn filter_order_does_not_change_predicates() {
        // AND composition is commutative in effect; the builder applies the
        // dimensions in a fixed order regardless of how callers populate
        // the filter struct.
        let a = ReportFilter {
            status_bucket: Some(StatusBucket::Resolved),
            report_type: Some(ReportType::NonEmergency),
            category_id: None,
        };
        let b = ReportFilter {
            report_type: Some(ReportType::NonEmergency),
            status_bucket: Some(StatusBucket::Resolved),
            category_id: None,
        };
        assert_eq!(
            build_query(QueryScope::Admin, a).sql(),
            build_query(QueryScope::Admin, b).sql()
        );
    }
}
