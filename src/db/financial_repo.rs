// src/db/financial_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::PaginationParams,
    },
    models::financial::{
        Payable, PayableFilters, Receivable, ReceivableFilters, RecurringInterval,
    },
};

#[derive(Clone)]
pub struct FinancialRepository {
    pool: PgPool,
}

impl FinancialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CONTAS A PAGAR
    // =========================================================================

    pub async fn create_payable(
        &self,
        name: &str,
        amount: Decimal,
        due_date: NaiveDate,
        description: Option<&str>,
        is_recurring: bool,
        recurring_interval: Option<RecurringInterval>,
    ) -> Result<Payable, AppError> {
        let payable = sqlx::query_as::<_, Payable>(
            r#"
            INSERT INTO payables (name, amount, due_date, description, is_recurring, recurring_interval)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(amount)
        .bind(due_date)
        .bind(description)
        .bind(is_recurring)
        .bind(recurring_interval)
        .fetch_one(&self.pool)
        .await?;

        Ok(payable)
    }

    pub async fn update_payable(
        &self,
        id: Uuid,
        name: &str,
        amount: Decimal,
        due_date: NaiveDate,
        description: Option<&str>,
        is_recurring: bool,
        recurring_interval: Option<RecurringInterval>,
    ) -> Result<Payable, AppError> {
        sqlx::query_as::<_, Payable>(
            r#"
            UPDATE payables
            SET name = $2, amount = $3, due_date = $4, description = $5,
                is_recurring = $6, recurring_interval = $7, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(amount)
        .bind(due_date)
        .bind(description)
        .bind(is_recurring)
        .bind(recurring_interval)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Conta a pagar não encontrada.".into()))
    }

    pub async fn delete_payable(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM payables WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Conta a pagar não encontrada.".into()));
        }
        Ok(())
    }

    pub async fn find_payable(&self, id: Uuid) -> Result<Option<Payable>, AppError> {
        let payable = sqlx::query_as::<_, Payable>("SELECT * FROM payables WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(payable)
    }

    pub async fn list_payables(
        &self,
        filters: &PayableFilters,
        pagination: PaginationParams,
    ) -> Result<(Vec<Payable>, i64), AppError> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM payables");
        push_payable_filters(&mut count_query, filters);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut page_query = QueryBuilder::<Postgres>::new("SELECT * FROM payables");
        push_payable_filters(&mut page_query, filters);
        page_query.push(" ORDER BY due_date ASC LIMIT ");
        page_query.push_bind(pagination.limit());
        page_query.push(" OFFSET ");
        page_query.push_bind(pagination.offset());

        let payables = page_query
            .build_query_as::<Payable>()
            .fetch_all(&self.pool)
            .await?;

        Ok((payables, total))
    }

    pub async fn mark_payable_paid(
        &self,
        id: Uuid,
        paid_at: DateTime<Utc>,
    ) -> Result<Payable, AppError> {
        sqlx::query_as::<_, Payable>(
            r#"
            UPDATE payables
            SET status = 'PAID', paid_at = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(paid_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Conta a pagar não encontrada.".into()))
    }

    // =========================================================================
    //  CONTAS A RECEBER
    // =========================================================================

    // Recebe executor: a venda a prazo cria a conta dentro da própria transação.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_receivable<'e, E>(
        &self,
        executor: E,
        customer_id: Option<Uuid>,
        sale_id: Option<Uuid>,
        name: &str,
        amount: Decimal,
        due_date: NaiveDate,
        description: Option<&str>,
    ) -> Result<Receivable, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let receivable = sqlx::query_as::<_, Receivable>(
            r#"
            INSERT INTO receivables (customer_id, sale_id, name, amount, due_date, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(sale_id)
        .bind(name)
        .bind(amount)
        .bind(due_date)
        .bind(description)
        .fetch_one(executor)
        .await?;

        Ok(receivable)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_receivable(
        &self,
        id: Uuid,
        customer_id: Option<Uuid>,
        sale_id: Option<Uuid>,
        name: &str,
        amount: Decimal,
        due_date: NaiveDate,
        description: Option<&str>,
    ) -> Result<Receivable, AppError> {
        sqlx::query_as::<_, Receivable>(
            r#"
            UPDATE receivables
            SET customer_id = $2, sale_id = $3, name = $4, amount = $5,
                due_date = $6, description = $7, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(customer_id)
        .bind(sale_id)
        .bind(name)
        .bind(amount)
        .bind(due_date)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Conta a receber não encontrada.".into()))
    }

    pub async fn delete_receivable(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM receivables WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Conta a receber não encontrada.".into()));
        }
        Ok(())
    }

    pub async fn find_receivable(&self, id: Uuid) -> Result<Option<Receivable>, AppError> {
        let receivable = sqlx::query_as::<_, Receivable>("SELECT * FROM receivables WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(receivable)
    }

    pub async fn list_receivables(
        &self,
        filters: &ReceivableFilters,
        pagination: PaginationParams,
    ) -> Result<(Vec<Receivable>, i64), AppError> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM receivables");
        push_receivable_filters(&mut count_query, filters);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut page_query = QueryBuilder::<Postgres>::new("SELECT * FROM receivables");
        push_receivable_filters(&mut page_query, filters);
        page_query.push(" ORDER BY due_date ASC LIMIT ");
        page_query.push_bind(pagination.limit());
        page_query.push(" OFFSET ");
        page_query.push_bind(pagination.offset());

        let receivables = page_query
            .build_query_as::<Receivable>()
            .fetch_all(&self.pool)
            .await?;

        Ok((receivables, total))
    }

    pub async fn mark_receivable_paid(
        &self,
        id: Uuid,
        paid_at: DateTime<Utc>,
    ) -> Result<Receivable, AppError> {
        sqlx::query_as::<_, Receivable>(
            r#"
            UPDATE receivables
            SET status = 'PAID', paid_at = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(paid_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Conta a receber não encontrada.".into()))
    }

    // No estorno, contas ainda pendentes da venda somem junto.
    pub async fn delete_pending_receivables_for_sale<'e, E>(
        &self,
        executor: E,
        sale_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "DELETE FROM receivables WHERE sale_id = $1 AND status = 'PENDING'",
        )
        .bind(sale_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    // =========================================================================
    //  VARREDURA DE VENCIDOS
    // =========================================================================
    // Contas pendentes com vencimento no passado viram OVERDUE. Roda antes das
    // listagens e das agregações do dashboard.

    pub async fn sweep_overdue(&self) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE payables SET status = 'OVERDUE', updated_at = now()
             WHERE status = 'PENDING' AND due_date < CURRENT_DATE",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "UPDATE receivables SET status = 'OVERDUE', updated_at = now()
             WHERE status = 'PENDING' AND due_date < CURRENT_DATE",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn push_payable_filters(query: &mut QueryBuilder<'_, Postgres>, filters: &PayableFilters) {
    query.push(" WHERE TRUE");

    if let Some(status) = filters.status {
        query.push(" AND status = ");
        query.push_bind(status);
    }
    if let Some(is_recurring) = filters.is_recurring {
        query.push(" AND is_recurring = ");
        query.push_bind(is_recurring);
    }
    if let Some(start_date) = filters.start_date {
        query.push(" AND due_date >= ");
        query.push_bind(start_date);
    }
    if let Some(end_date) = filters.end_date {
        query.push(" AND due_date <= ");
        query.push_bind(end_date);
    }
}

fn push_receivable_filters(query: &mut QueryBuilder<'_, Postgres>, filters: &ReceivableFilters) {
    query.push(" WHERE TRUE");

    if let Some(status) = filters.status {
        query.push(" AND status = ");
        query.push_bind(status);
    }
    if let Some(customer_id) = filters.customer_id {
        query.push(" AND customer_id = ");
        query.push_bind(customer_id);
    }
    if let Some(start_date) = filters.start_date {
        query.push(" AND due_date >= ");
        query.push_bind(start_date);
    }
    if let Some(end_date) = filters.end_date {
        query.push(" AND due_date <= ");
        query.push_bind(end_date);
    }
}
