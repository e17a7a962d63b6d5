use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::officers::models::Officer;

/// Response DTO for officer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OfficerResponseDto {
    pub id: Uuid,
    pub name: String,
    pub department: String,
    pub contact: Option<String>,
}

impl From<Officer> for OfficerResponseDto {
    fn from(o: Officer) -> Self {
        Self {
            id: o.id,
            name: o.name,
            department: o.department,
            contact: o.contact,
        }
    }
}
