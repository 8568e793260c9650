// src/models/payment_method.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::sale::PaymentType;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: Uuid,

    #[schema(example = "Cartão de Crédito")]
    pub name: String,

    // Rótulo livre exibido na tela (ex: "Cartão", "Dinheiro", "Pix")
    #[schema(example = "Cartão")]
    pub kind: String,

    // À vista ou a prazo — decide se a venda gera conta a receber
    pub payment_type: PaymentType,

    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
