// src/models/sale.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{customer::Customer, product::Product};

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Cash,   // À vista
    Credit, // A prazo
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sale_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Pending,
    Completed,
    Cancelled,
    Refunded, // Estornada
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,

    pub customer_id: Option<Uuid>,

    // Preenchido depois da consulta, juntando pela customer_id
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,

    #[schema(example = "150.00")]
    pub total_amount: Decimal,

    #[schema(example = "10.00")]
    pub discount: Decimal,

    #[schema(example = "60.00")]
    pub profit_estimate: Decimal,

    pub payment_type: PaymentType,
    pub status: SaleStatus,

    pub sale_date: DateTime<Utc>,

    // Só faz sentido em venda a prazo
    #[schema(value_type = Option<String>, format = Date, example = "2026-09-10")]
    pub due_date: Option<NaiveDate>,

    pub notes: Option<String>,

    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<SaleItem>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub product_id: Uuid,

    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,

    pub quantity: i32,

    #[schema(example = "45.00")]
    pub unit_price: Decimal,

    // quantity * unit_price, calculado no servidor
    #[schema(example = "90.00")]
    pub total_price: Decimal,

    // Custo do produto no momento da venda (para estimativa de lucro)
    #[schema(example = "25.00")]
    pub cost_price: Decimal,

    pub created_at: DateTime<Utc>,
}

// Filtros da listagem de vendas
#[derive(Debug, Clone, Default)]
pub struct SaleFilters {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub payment_type: Option<PaymentType>,
    pub status: Option<SaleStatus>,
    pub customer_id: Option<Uuid>,
}

// Totais consolidados de um período
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    pub total_sales: Decimal,
    pub total_profit: Decimal,
    pub count: i64,
}

// Linha crua usada pelo agrupamento mensal (vem do banco, é reduzida no service)
#[derive(Debug, Clone, FromRow)]
pub struct SaleTotalsRow {
    pub sale_date: DateTime<Utc>,
    pub total_amount: Decimal,
    pub profit_estimate: Decimal,
}

// --- Payloads ---

fn validate_not_negative(value: &Decimal) -> Result<(), validator::ValidationError> {
    if value.is_sign_negative() {
        let mut err = validator::ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemPayload {
    pub product_id: Uuid,

    #[validate(range(min = 1, message = "A quantidade deve ser pelo menos 1."))]
    pub quantity: i32,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "45.00")]
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    pub customer_id: Option<Uuid>,

    pub payment_type: PaymentType,

    // Se não vier, a venda é registrada com a data atual
    pub sale_date: Option<DateTime<Utc>>,

    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub discount: Decimal,

    #[validate(length(max = 500, message = "Observações muito longas."))]
    pub notes: Option<String>,

    #[validate(length(min = 1, message = "Pelo menos um item é obrigatório."))]
    #[validate(nested)]
    pub items: Vec<SaleItemPayload>,
}

#[derive(Debug, Clone, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSalePayload {
    pub customer_id: Option<Uuid>,

    pub payment_type: PaymentType,
    pub status: SaleStatus,

    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,

    #[validate(length(max = 500, message = "Observações muito longas."))]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn item(quantity: i32, unit_price: Decimal) -> SaleItemPayload {
        SaleItemPayload {
            product_id: Uuid::new_v4(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn venda_sem_itens_e_invalida() {
        let payload = CreateSalePayload {
            customer_id: None,
            payment_type: PaymentType::Cash,
            sale_date: None,
            due_date: None,
            discount: Decimal::ZERO,
            notes: None,
            items: vec![],
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("items"));
    }

    #[test]
    fn item_com_quantidade_zero_e_invalido() {
        let payload = CreateSalePayload {
            customer_id: None,
            payment_type: PaymentType::Cash,
            sale_date: None,
            due_date: None,
            discount: Decimal::ZERO,
            notes: None,
            items: vec![item(0, Decimal::new(4500, 2))],
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn desconto_negativo_e_invalido() {
        let payload = CreateSalePayload {
            customer_id: None,
            payment_type: PaymentType::Cash,
            sale_date: None,
            due_date: None,
            discount: Decimal::new(-100, 2),
            notes: None,
            items: vec![item(1, Decimal::new(4500, 2))],
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("discount"));
    }

    #[test]
    fn venda_valida_passa() {
        let payload = CreateSalePayload {
            customer_id: Some(Uuid::new_v4()),
            payment_type: PaymentType::Credit,
            sale_date: None,
            due_date: None,
            discount: Decimal::new(1000, 2),
            notes: Some("Entrega combinada".into()),
            items: vec![item(2, Decimal::new(4500, 2)), item(1, Decimal::new(7000, 2))],
        };
        assert!(payload.validate().is_ok());
    }
}
