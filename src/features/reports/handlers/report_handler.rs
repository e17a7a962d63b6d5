use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{
    AdvanceStatusDto, AssignOfficerDto, AttachResolutionDto, ReportResponseDto, ReportStatsDto,
    SubmitReportDto,
};
use crate::features::reports::models::{CreateReport, ReportType};
use crate::features::reports::services::{
    LifecycleService, QueryScope, QueryService, ReportFilter, StatusBucket,
};
use crate::shared::types::{ApiResponse, Meta};

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub lifecycle_service: Arc<LifecycleService>,
    pub query_service: Arc<QueryService>,
}

/// Query params for listing reports
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ReportQueryParams {
    /// Status bucket: `pending` (includes in-progress) or `resolved`.
    /// Omit for all statuses.
    pub status_bucket: Option<StatusBucket>,
    /// Report type filter; omit for all types
    #[serde(rename = "type")]
    pub report_type: Option<ReportType>,
    /// Category filter; omit for all categories
    pub category_id: Option<Uuid>,
}

impl From<ReportQueryParams> for ReportFilter {
    fn from(p: ReportQueryParams) -> Self {
        Self {
            status_bucket: p.status_bucket,
            report_type: p.report_type,
            category_id: p.category_id,
        }
    }
}

fn scope_for(user: &AuthenticatedUser) -> QueryScope {
    if user.is_admin() {
        QueryScope::Admin
    } else {
        QueryScope::Citizen(user.id)
    }
}

/// Submit a new report
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = SubmitReportDto,
    responses(
        (status = 200, description = "Report created", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Unknown category"),
        (status = 422, description = "Subcategory does not belong to category")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn submit_report(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    AppJson(dto): AppJson<SubmitReportDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    dto.validate()?;

    let data = CreateReport {
        title: dto.title,
        description: dto.description,
        report_type: dto.report_type,
        category_id: dto.category_id,
        subcategory_id: dto.subcategory_id,
        location_address: dto.location_address,
        location_lat: dto.location_lat,
        location_lng: dto.location_lng,
        image_refs: dto.image_refs,
    };

    let report = state.lifecycle_service.submit(&user, data).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// List reports visible to the caller, filtered and newest first
///
/// Citizens see their own reports; admins see everything.
#[utoipa::path(
    get,
    path = "/api/reports",
    params(ReportQueryParams),
    responses(
        (status = 200, description = "Matching reports", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_reports(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    Query(params): Query<ReportQueryParams>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = state
        .query_service
        .query(scope_for(&user), params.into())
        .await?;

    let total = reports.len() as i64;
    let dtos: Vec<ReportResponseDto> = reports.into_iter().map(|r| r.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Per-bucket report counts for the caller's scope
#[utoipa::path(
    get,
    path = "/api/reports/stats",
    responses(
        (status = 200, description = "Report counts", body = ApiResponse<ReportStatsDto>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn get_stats(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
) -> Result<Json<ApiResponse<ReportStatsDto>>> {
    let stats = state.query_service.stats(scope_for(&user)).await?;
    let dto = ReportStatsDto {
        total: stats.total,
        pending: stats.pending,
        in_progress: stats.in_progress,
        resolved: stats.resolved,
    };
    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}

/// Get report by ID
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn get_report(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = state.query_service.get_scoped(id, scope_for(&user)).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Advance report status (admin only)
#[utoipa::path(
    patch,
    path = "/api/reports/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    request_body = AdvanceStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Report not found"),
        (status = 409, description = "Illegal status transition")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn advance_status(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<AdvanceStatusDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = state.lifecycle_service.advance_status(id, dto.status).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Assign or unassign an officer (admin only)
#[utoipa::path(
    put,
    path = "/api/reports/{id}/officer",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    request_body = AssignOfficerDto,
    responses(
        (status = 200, description = "Assignment updated", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Report or officer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn assign_officer(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<AssignOfficerDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = state
        .lifecycle_service
        .assign_officer(id, dto.officer_id)
        .await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Attach resolution details (admin only)
#[utoipa::path(
    put,
    path = "/api/reports/{id}/resolution",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    request_body = AttachResolutionDto,
    responses(
        (status = 200, description = "Resolution attached", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn attach_resolution(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<AttachResolutionDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = state
        .lifecycle_service
        .attach_resolution(id, &dto.resolution_details)
        .await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}
