// src/models/customer.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,

    #[schema(example = "João Silva")]
    pub name: String,

    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha do relatório "melhores clientes"
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopCustomerEntry {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub total_amount: Decimal,
    pub sales_count: i64,
}

// Clientes com contas a receber em aberto
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerReceivablesEntry {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub total_amount: Decimal,
    pub receivables_count: i64,
}
