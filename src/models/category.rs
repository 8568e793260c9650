// src/models/category.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,

    #[schema(example = "Bebidas")]
    pub name: String,

    pub description: Option<String>,

    // Cor de exibição no front (ex: "#22c55e")
    pub color: Option<String>,

    // Exclusão lógica: categorias desativadas somem das listagens
    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
