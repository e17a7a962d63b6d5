use sqlx::FromRow;
use uuid::Uuid;

/// Database model for officer
#[derive(Debug, Clone, FromRow)]
pub struct Officer {
    pub id: Uuid,
    pub name: String,
    pub department: String,
    pub contact: Option<String>,
}
