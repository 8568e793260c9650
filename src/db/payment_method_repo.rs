// src/db/payment_method_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{payment_method::PaymentMethod, sale::PaymentType},
};

#[derive(Clone)]
pub struct PaymentMethodRepository {
    pool: PgPool,
}

impl PaymentMethodRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<PaymentMethod>, AppError> {
        let methods = sqlx::query_as::<_, PaymentMethod>(
            "SELECT * FROM payment_methods ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(methods)
    }

    pub async fn find_active(&self) -> Result<Vec<PaymentMethod>, AppError> {
        let methods = sqlx::query_as::<_, PaymentMethod>(
            "SELECT * FROM payment_methods WHERE active = TRUE ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(methods)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PaymentMethod>, AppError> {
        let method =
            sqlx::query_as::<_, PaymentMethod>("SELECT * FROM payment_methods WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(method)
    }

    pub async fn create(
        &self,
        name: &str,
        kind: &str,
        payment_type: PaymentType,
    ) -> Result<PaymentMethod, AppError> {
        // Formas de pagamento criadas são ativas por padrão
        let method = sqlx::query_as::<_, PaymentMethod>(
            r#"
            INSERT INTO payment_methods (name, kind, payment_type, active)
            VALUES ($1, $2, $3, TRUE)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(kind)
        .bind(payment_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(method)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        kind: &str,
        payment_type: PaymentType,
    ) -> Result<PaymentMethod, AppError> {
        sqlx::query_as::<_, PaymentMethod>(
            r#"
            UPDATE payment_methods
            SET name = $2, kind = $3, payment_type = $4, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(kind)
        .bind(payment_type)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Forma de pagamento não encontrada.".into()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM payment_methods WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Forma de pagamento não encontrada.".into()));
        }
        Ok(())
    }

    pub async fn set_active(&self, id: Uuid, active: bool) -> Result<PaymentMethod, AppError> {
        sqlx::query_as::<_, PaymentMethod>(
            r#"
            UPDATE payment_methods
            SET active = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Forma de pagamento não encontrada.".into()))
    }
}
