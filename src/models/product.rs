// src/models/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::category::Category;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,

    #[schema(example = "Camiseta Básica")]
    pub name: String,

    pub description: Option<String>,

    #[schema(example = "25.00")]
    pub cost_price: Decimal,

    #[schema(example = "45.00")]
    pub sale_price: Decimal,

    pub stock_quantity: i32,

    // Serviços (ex: frete, montagem) não movimentam estoque
    pub moves_stock: bool,

    // Exclusão lógica
    pub active: bool,

    pub category_id: Option<Uuid>,

    // Preenchida depois da consulta, juntando pela category_id
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Filtros da listagem de produtos
#[derive(Debug, Clone, Default)]
pub struct ProductFilters {
    pub search: Option<String>,
    pub moves_stock: Option<bool>,
    pub low_stock: bool,
}

// Linha do relatório "mais vendidos"
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopProductEntry {
    pub product_id: Uuid,
    pub product_name: String,
    pub total_quantity: i64,
    pub total_revenue: Decimal,
}
