use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::catalog::dtos::{CategoryResponseDto, SubcategoryResponseDto};
use crate::features::catalog::services::CatalogService;
use crate::features::reports::models::ReportType;
use crate::shared::types::ApiResponse;

/// Query params for listing categories
#[derive(Debug, Deserialize)]
pub struct ListCategoriesQuery {
    /// Restrict to one report type; omit for all categories
    #[serde(rename = "type")]
    pub category_type: Option<ReportType>,
}

/// List categories, optionally filtered by report type
#[utoipa::path(
    get,
    path = "/api/categories",
    params(
        ("type" = Option<String>, Query, description = "Filter: emergency or non_emergency")
    ),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "catalog"
)]
pub async fn list_categories(
    State(service): State<Arc<CatalogService>>,
    Query(query): Query<ListCategoriesQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.list_categories(query.category_type).await?;
    let dtos: Vec<CategoryResponseDto> = categories.into_iter().map(|c| c.into()).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// List subcategories of a category
#[utoipa::path(
    get,
    path = "/api/categories/{id}/subcategories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "List of subcategories", body = ApiResponse<Vec<SubcategoryResponseDto>>),
        (status = 404, description = "Category not found")
    ),
    tag = "catalog"
)]
pub async fn list_subcategories(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<SubcategoryResponseDto>>>> {
    let subcategories = service.list_subcategories(id).await?;
    let dtos: Vec<SubcategoryResponseDto> = subcategories.into_iter().map(|s| s.into()).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}
