use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::officers::models::Officer;

/// Read path over the officer directory, seeded by migration
pub struct OfficerService {
    pool: PgPool,
}

impl OfficerService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all officers, ordered by name
    pub async fn list(&self) -> Result<Vec<Officer>> {
        sqlx::query_as::<_, Officer>(
            r#"
            SELECT id, name, department, contact
            FROM officers
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list officers: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Get officer by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Officer> {
        sqlx::query_as::<_, Officer>(
            r#"
            SELECT id, name, department, contact
            FROM officers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get officer: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Officer {} not found", id)))
    }
}
