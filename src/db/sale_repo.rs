// src/db/sale_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::PaginationParams,
    },
    models::sale::{PaymentType, Sale, SaleFilters, SaleItem, SaleStatus, SaleTotalsRow},
};

#[derive(Clone)]
pub struct SaleRepository {
    pool: PgPool,
}

impl SaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Escritas transacionais (recebem o executor da transação aberta no service)
    // ---

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_sale<'e, E>(
        &self,
        executor: E,
        customer_id: Option<Uuid>,
        total_amount: Decimal,
        discount: Decimal,
        profit_estimate: Decimal,
        payment_type: PaymentType,
        sale_date: DateTime<Utc>,
        due_date: Option<NaiveDate>,
        notes: Option<&str>,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales
                (customer_id, total_amount, discount, profit_estimate,
                 payment_type, sale_date, due_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(total_amount)
        .bind(discount)
        .bind(profit_estimate)
        .bind(payment_type)
        .bind(sale_date)
        .bind(due_date)
        .bind(notes)
        .fetch_one(executor)
        .await?;

        Ok(sale)
    }

    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        sale_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        unit_price: Decimal,
        total_price: Decimal,
        cost_price: Decimal,
    ) -> Result<SaleItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, SaleItem>(
            r#"
            INSERT INTO sale_items
                (sale_id, product_id, quantity, unit_price, total_price, cost_price)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(sale_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(total_price)
        .bind(cost_price)
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    // Delta positivo devolve estoque (estorno); negativo baixa (venda).
    // Produtos que não movimentam estoque ficam intocados.
    pub async fn adjust_stock<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        delta: i32,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "UPDATE products SET stock_quantity = stock_quantity + $2, updated_at = now()
             WHERE id = $1 AND moves_stock = TRUE",
        )
        .bind(product_id)
        .bind(delta)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: SaleStatus,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Sale>(
            "UPDATE sales SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::NotFound("Venda não encontrada.".into()))
    }

    // ---
    // Leituras
    // ---

    pub async fn find_header(&self, id: Uuid) -> Result<Option<Sale>, AppError> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(sale)
    }

    pub async fn items_for_sale<'e, E>(
        &self,
        executor: E,
        sale_id: Uuid,
    ) -> Result<Vec<SaleItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, SaleItem>(
            "SELECT * FROM sale_items WHERE sale_id = $1 ORDER BY created_at ASC",
        )
        .bind(sale_id)
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    pub async fn update_header(
        &self,
        id: Uuid,
        customer_id: Option<Uuid>,
        payment_type: PaymentType,
        status: SaleStatus,
        due_date: Option<NaiveDate>,
        notes: Option<&str>,
    ) -> Result<Sale, AppError> {
        sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sales
            SET customer_id = $2, payment_type = $3, status = $4,
                due_date = $5, notes = $6, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(customer_id)
        .bind(payment_type)
        .bind(status)
        .bind(due_date)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Venda não encontrada.".into()))
    }

    // Exclusão física: os itens caem junto (ON DELETE CASCADE).
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Venda não encontrada.".into()));
        }
        Ok(())
    }

    // Paginação em duas idas ao banco, com os mesmos filtros nas duas.
    pub async fn list(
        &self,
        filters: &SaleFilters,
        pagination: PaginationParams,
    ) -> Result<(Vec<Sale>, i64), AppError> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM sales");
        push_filters(&mut count_query, filters);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut page_query = QueryBuilder::<Postgres>::new("SELECT * FROM sales");
        push_filters(&mut page_query, filters);
        page_query.push(" ORDER BY sale_date DESC LIMIT ");
        page_query.push_bind(pagination.limit());
        page_query.push(" OFFSET ");
        page_query.push_bind(pagination.offset());

        let sales = page_query
            .build_query_as::<Sale>()
            .fetch_all(&self.pool)
            .await?;

        Ok((sales, total))
    }

    // Totais consolidados de um período (ambas as pontas opcionais).
    pub async fn stats(
        &self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<(Decimal, Decimal, i64), AppError> {
        let row = sqlx::query_as::<_, (Decimal, Decimal, i64)>(
            r#"
            SELECT
                COALESCE(SUM(total_amount), 0),
                COALESCE(SUM(profit_estimate), 0),
                COUNT(*)
            FROM sales
            WHERE ($1::timestamptz IS NULL OR sale_date >= $1)
              AND ($2::timestamptz IS NULL OR sale_date <= $2)
            "#,
        )
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    // Linhas cruas das vendas concluídas do período (o service agrupa por mês).
    pub async fn completed_totals_since(
        &self,
        start_date: DateTime<Utc>,
    ) -> Result<Vec<SaleTotalsRow>, AppError> {
        let rows = sqlx::query_as::<_, SaleTotalsRow>(
            r#"
            SELECT sale_date, total_amount, profit_estimate
            FROM sales
            WHERE status = 'COMPLETED' AND sale_date >= $1
            ORDER BY sale_date ASC
            "#,
        )
        .bind(start_date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filters: &SaleFilters) {
    query.push(" WHERE TRUE");

    if let Some(start_date) = filters.start_date {
        query.push(" AND sale_date >= ");
        query.push_bind(start_date);
    }
    if let Some(end_date) = filters.end_date {
        query.push(" AND sale_date <= ");
        query.push_bind(end_date);
    }
    if let Some(payment_type) = filters.payment_type {
        query.push(" AND payment_type = ");
        query.push_bind(payment_type);
    }
    if let Some(status) = filters.status {
        query.push(" AND status = ");
        query.push_bind(status);
    }
    if let Some(customer_id) = filters.customer_id {
        query.push(" AND customer_id = ");
        query.push_bind(customer_id);
    }
}
