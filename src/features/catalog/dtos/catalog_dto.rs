use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::catalog::models::{Category, Subcategory};
use crate::features::reports::models::ReportType;

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: ReportType,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            category_type: c.category_type,
        }
    }
}

/// Response DTO for subcategory
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubcategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
}

impl From<Subcategory> for SubcategoryResponseDto {
    fn from(s: Subcategory) -> Self {
        Self {
            id: s.id,
            name: s.name,
            category_id: s.category_id,
        }
    }
}
