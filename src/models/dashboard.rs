// src/models/dashboard.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Cartões de resumo da tela inicial
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_sales: Decimal,
    pub total_profit: Decimal,
    pub total_sales_count: i64,
    pub current_balance: Decimal,
    pub overdue_payables: i64,
    pub overdue_receivables: i64,
    pub low_stock_products: i64,
}

// Ponto do gráfico de vendas, agregado por mês ("2026-08")
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesChartEntry {
    pub period: String,
    pub sales: Decimal,
    pub profit: Decimal,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_payables: Decimal,
    pub total_receivables: Decimal,
    pub net_balance: Decimal,
    pub overdue_amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DueDateKind {
    Payable,
    Receivable,
}

// Conta (a pagar ou a receber) que vence nos próximos dias
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingDueDate {
    #[serde(rename = "type")]
    pub kind: DueDateKind,
    pub name: String,
    pub amount: Decimal,
    #[schema(value_type = String, format = Date)]
    pub due_date: NaiveDate,
    pub customer_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LowStockAlert {
    pub id: Uuid,
    pub name: String,
    pub stock_quantity: i32,
    pub cost_price: Decimal,
    // stock_quantity * cost_price, calculado no service
    #[sqlx(skip)]
    pub stock_value: Decimal,
}

// Entrada do feed "atividade recente" (hoje só vendas alimentam o feed)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub description: String,
}
