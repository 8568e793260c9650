// src/db/category_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::PaginationParams,
    },
    models::category::Category,
};

#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        color: Option<&str>,
    ) -> Result<Category, AppError> {
        // Categorias criadas são ativas por padrão
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description, color, active)
            VALUES ($1, $2, $3, TRUE)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(color)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        color: Option<&str>,
    ) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, description = $3, color = $4, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(color)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Categoria não encontrada.".into()))
    }

    // Exclusão lógica: setar active como false
    pub async fn soft_delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE categories SET active = FALSE, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Categoria não encontrada.".into()));
        }
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE id = $1 AND active = TRUE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    // Paginação em duas idas ao banco: COUNT e depois a página.
    pub async fn list_active(
        &self,
        pagination: PaginationParams,
    ) -> Result<(Vec<Category>, i64), AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM categories WHERE active = TRUE",
        )
        .fetch_one(&self.pool)
        .await?;

        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT * FROM categories
            WHERE active = TRUE
            ORDER BY name ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((categories, total))
    }

    pub async fn find_active(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE active = TRUE ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }
}
