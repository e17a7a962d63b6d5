use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::catalog::{dtos as catalog_dtos, handlers as catalog_handlers};
use crate::features::officers::{dtos as officers_dtos, handlers as officers_handlers};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
    services as reports_services,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Catalog (public)
        catalog_handlers::list_categories,
        catalog_handlers::list_subcategories,
        // Officers (admin)
        officers_handlers::list_officers,
        officers_handlers::get_officer,
        // Reports
        reports_handlers::submit_report,
        reports_handlers::list_reports,
        reports_handlers::get_stats,
        reports_handlers::get_report,
        reports_handlers::advance_status,
        reports_handlers::assign_officer,
        reports_handlers::attach_resolution,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            auth::model::UserRole,
            // Catalog
            catalog_dtos::CategoryResponseDto,
            catalog_dtos::SubcategoryResponseDto,
            ApiResponse<Vec<catalog_dtos::CategoryResponseDto>>,
            ApiResponse<Vec<catalog_dtos::SubcategoryResponseDto>>,
            // Officers
            officers_dtos::OfficerResponseDto,
            ApiResponse<Vec<officers_dtos::OfficerResponseDto>>,
            ApiResponse<officers_dtos::OfficerResponseDto>,
            // Reports
            reports_models::ReportStatus,
            reports_models::ReportType,
            reports_services::StatusBucket,
            reports_dtos::SubmitReportDto,
            reports_dtos::AdvanceStatusDto,
            reports_dtos::AssignOfficerDto,
            reports_dtos::AttachResolutionDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::ReportStatsDto,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<reports_dtos::ReportStatsDto>,
        )
    ),
    tags(
        (name = "catalog", description = "Classification catalog (public)"),
        (name = "officers", description = "Officer directory (admin only)"),
        (name = "reports", description = "Report lifecycle and queries"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "CivicWatch API",
        version = "0.1.0",
        description = "API documentation for CivicWatch",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
