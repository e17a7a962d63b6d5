use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::catalog::models::{Category, Subcategory};
use crate::features::reports::models::ReportType;

/// Read path over the classification catalog. The catalog is seeded by
/// migration; there is no write path.
pub struct CatalogService {
    pool: PgPool,
}

impl CatalogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List categories, optionally restricted to one report type
    pub async fn list_categories(&self, category_type: Option<ReportType>) -> Result<Vec<Category>> {
        let categories = match category_type {
            Some(t) => {
                sqlx::query_as::<_, Category>(
                    r#"
                    SELECT id, name, type
                    FROM categories
                    WHERE type = $1
                    ORDER BY name
                    "#,
                )
                .bind(t)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Category>(
                    r#"
                    SELECT id, name, type
                    FROM categories
                    ORDER BY name
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories)
    }

    /// Get category by ID
    pub async fn get_category(&self, id: Uuid) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, type
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// List subcategories of a category. Unknown category is an error, an
    /// existing category with no subcategories yields an empty list.
    pub async fn list_subcategories(&self, category_id: Uuid) -> Result<Vec<Subcategory>> {
        self.get_category(category_id).await?;

        sqlx::query_as::<_, Subcategory>(
            r#"
            SELECT id, name, category_id
            FROM subcategories
            WHERE category_id = $1
            ORDER BY name
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list subcategories: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Get subcategory by ID
    pub async fn get_subcategory(&self, id: Uuid) -> Result<Subcategory> {
        sqlx::query_as::<_, Subcategory>(
            r#"
            SELECT id, name, category_id
            FROM subcategories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get subcategory: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Subcategory {} not found", id)))
    }
}
