// src/db/dashboard_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        dashboard::{DashboardStats, LowStockAlert},
        financial::Payable,
        sale::PaymentType,
    },
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Resumo geral: várias consultas independentes dentro de uma transação
    // (snapshot consistente dos dados).
    pub async fn get_stats(&self, low_stock_threshold: i32) -> Result<DashboardStats, AppError> {
        let mut tx = self.pool.begin().await?;

        // A. Vendas concluídas
        let (total_sales, total_profit, total_sales_count) =
            sqlx::query_as::<_, (Decimal, Decimal, i64)>(
                r#"
                SELECT COALESCE(SUM(total_amount), 0), COALESCE(SUM(profit_estimate), 0), COUNT(*)
                FROM sales
                WHERE status = 'COMPLETED'
                "#,
            )
            .fetch_one(&mut *tx)
            .await?;

        // B. Produtos com estoque baixo
        let low_stock_products = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM products
            WHERE active = TRUE AND moves_stock = TRUE AND stock_quantity < $1
            "#,
        )
        .bind(low_stock_threshold)
        .fetch_one(&mut *tx)
        .await?;

        // C. Contas vencidas
        let overdue_payables = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM payables WHERE status = 'OVERDUE'",
        )
        .fetch_one(&mut *tx)
        .await?;

        let overdue_receivables = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM receivables WHERE status = 'OVERDUE'",
        )
        .fetch_one(&mut *tx)
        .await?;

        // D. Saldo atual (a receber - a pagar, considerando só o pendente)
        let pending_receivables = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM receivables WHERE status = 'PENDING'",
        )
        .fetch_one(&mut *tx)
        .await?;

        let pending_payables = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM payables WHERE status = 'PENDING'",
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(DashboardStats {
            total_sales,
            total_profit,
            total_sales_count,
            current_balance: pending_receivables - pending_payables,
            overdue_payables,
            overdue_receivables,
            low_stock_products,
        })
    }

    // Somas do resumo financeiro: (pendente + vencido, só vencido) por lado.
    pub async fn financial_sums(&self) -> Result<(Decimal, Decimal, Decimal), AppError> {
        let mut tx = self.pool.begin().await?;

        let total_payables = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM payables WHERE status IN ('PENDING', 'OVERDUE')",
        )
        .fetch_one(&mut *tx)
        .await?;

        let total_receivables = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM receivables WHERE status IN ('PENDING', 'OVERDUE')",
        )
        .fetch_one(&mut *tx)
        .await?;

        let overdue_amount = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(
                (SELECT COALESCE(SUM(amount), 0) FROM payables WHERE status = 'OVERDUE')
              + (SELECT COALESCE(SUM(amount), 0) FROM receivables WHERE status = 'OVERDUE'),
            0)
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((total_payables, total_receivables, overdue_amount))
    }

    pub async fn upcoming_payables(&self, until: NaiveDate) -> Result<Vec<Payable>, AppError> {
        let payables = sqlx::query_as::<_, Payable>(
            r#"
            SELECT * FROM payables
            WHERE status = 'PENDING' AND due_date <= $1
            ORDER BY due_date ASC
            "#,
        )
        .bind(until)
        .fetch_all(&self.pool)
        .await?;
        Ok(payables)
    }

    // (nome, valor, vencimento, nome do cliente)
    pub async fn upcoming_receivables(
        &self,
        until: NaiveDate,
    ) -> Result<Vec<(String, Decimal, NaiveDate, Option<String>)>, AppError> {
        let rows = sqlx::query_as::<_, (String, Decimal, NaiveDate, Option<String>)>(
            r#"
            SELECT r.name, r.amount, r.due_date, c.name
            FROM receivables r
            LEFT JOIN customers c ON c.id = r.customer_id
            WHERE r.status = 'PENDING' AND r.due_date <= $1
            ORDER BY r.due_date ASC
            "#,
        )
        .bind(until)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn low_stock(&self, threshold: i32) -> Result<Vec<LowStockAlert>, AppError> {
        let alerts = sqlx::query_as::<_, LowStockAlert>(
            r#"
            SELECT id, name, stock_quantity, cost_price
            FROM products
            WHERE active = TRUE AND moves_stock = TRUE AND stock_quantity < $1
            ORDER BY stock_quantity ASC
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;
        Ok(alerts)
    }

    // (id, valor, data, tipo de pagamento, nome do cliente)
    pub async fn recent_sales(
        &self,
        limit: i64,
    ) -> Result<Vec<(Uuid, Decimal, DateTime<Utc>, PaymentType, Option<String>)>, AppError> {
        let rows = sqlx::query_as::<_, (Uuid, Decimal, DateTime<Utc>, PaymentType, Option<String>)>(
            r#"
            SELECT s.id, s.total_amount, s.sale_date, s.payment_type, c.name
            FROM sales s
            LEFT JOIN customers c ON c.id = s.customer_id
            ORDER BY s.sale_date DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
