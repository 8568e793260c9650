// src/models/financial.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::customer::Customer;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "bill_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending, // Em aberto
    Paid,    // Quitada
    Overdue, // Vencida
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "recurring_interval", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "lowercase")]
pub enum RecurringInterval {
    Monthly,
    Quarterly,
    Yearly,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payable {
    pub id: Uuid,

    #[schema(example = "Aluguel da loja")]
    pub name: String,

    #[schema(example = "1800.00")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-09-05")]
    pub due_date: NaiveDate,

    pub description: Option<String>,

    // Conta recorrente gera a próxima ocorrência ao ser quitada
    pub is_recurring: bool,
    pub recurring_interval: Option<RecurringInterval>,

    pub status: BillStatus,
    pub paid_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Receivable {
    pub id: Uuid,

    pub customer_id: Option<Uuid>,

    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,

    // Venda a prazo que originou a conta, quando houver
    pub sale_id: Option<Uuid>,

    #[schema(example = "Venda a prazo - João Silva")]
    pub name: String,

    #[schema(example = "150.00")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-09-10")]
    pub due_date: NaiveDate,

    pub description: Option<String>,

    pub status: BillStatus,
    pub paid_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Filtros das listagens financeiras
#[derive(Debug, Clone, Default)]
pub struct PayableFilters {
    pub status: Option<BillStatus>,
    pub is_recurring: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct ReceivableFilters {
    pub status: Option<BillStatus>,
    pub customer_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
