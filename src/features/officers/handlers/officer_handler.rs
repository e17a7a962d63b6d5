use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::guards::RequireAdmin;
use crate::features::officers::dtos::OfficerResponseDto;
use crate::features::officers::services::OfficerService;
use crate::shared::types::ApiResponse;

/// List officers available for assignment (admin only)
#[utoipa::path(
    get,
    path = "/api/officers",
    responses(
        (status = 200, description = "List of officers", body = ApiResponse<Vec<OfficerResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = [])),
    tag = "officers"
)]
pub async fn list_officers(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<OfficerService>>,
) -> Result<Json<ApiResponse<Vec<OfficerResponseDto>>>> {
    let officers = service.list().await?;
    let dtos: Vec<OfficerResponseDto> = officers.into_iter().map(|o| o.into()).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Get officer by ID (admin only)
#[utoipa::path(
    get,
    path = "/api/officers/{id}",
    params(
        ("id" = Uuid, Path, description = "Officer ID")
    ),
    responses(
        (status = 200, description = "Officer found", body = ApiResponse<OfficerResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Officer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "officers"
)]
pub async fn get_officer(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<OfficerService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<OfficerResponseDto>>> {
    let officer = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(officer.into()), None, None)))
}
