use sqlx::FromRow;
use uuid::Uuid;

use crate::features::reports::models::ReportType;

/// Database model for category
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[sqlx(rename = "type")]
    pub category_type: ReportType,
}

/// Database model for subcategory
#[derive(Debug, Clone, FromRow)]
pub struct Subcategory {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
}
