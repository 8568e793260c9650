// src/handlers/products.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination::PaginationParams},
    config::AppState,
    models::product::ProductFilters,
};

// ---
// Validação Customizada
// ---
fn validate_not_negative(value: &Decimal) -> Result<(), validator::ValidationError> {
    if value.is_sign_negative() {
        let mut err = validator::ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: Produto (criação e atualização usam o mesmo shape)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório."))]
    #[schema(example = "Camiseta Básica")]
    pub name: String,

    #[validate(length(max = 500, message = "Descrição muito longa."))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "25.00")]
    pub cost_price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "45.00")]
    pub sale_price: Decimal,

    #[validate(range(min = 0, message = "A quantidade deve ser maior ou igual a zero."))]
    pub stock_quantity: i32,

    // Se o JSON não tiver esse campo, assume true
    #[serde(default = "default_moves_stock")]
    pub moves_stock: bool,

    pub category_id: Option<Uuid>,
}

fn default_moves_stock() -> bool {
    true
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    // Busca por nome (ILIKE)
    pub search: Option<String>,
    pub moves_stock: Option<bool>,
    pub low_stock: Option<bool>,
}

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Produtos",
    params(ListProductsQuery),
    responses(
        (status = 200, description = "Página de produtos ativos, com a categoria embutida")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let defaults = PaginationParams::default();
    let pagination = PaginationParams::new(
        query.page.unwrap_or(defaults.page),
        query.limit.unwrap_or(defaults.limit),
    );

    let filters = ProductFilters {
        search: query.search,
        moves_stock: query.moves_stock,
        low_stock: query.low_stock.unwrap_or(false),
    };

    let page = app_state.product_service.find_all(filters, pagination).await?;
    Ok((StatusCode::OK, Json(page)))
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Produtos",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Produto criado"),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state
        .product_service
        .create(
            &payload.name,
            payload.description.as_deref(),
            payload.cost_price,
            payload.sale_price,
            payload.stock_quantity,
            payload.moves_stock,
            payload.category_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Produtos",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto com a categoria embutida"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state.product_service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(product)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Produtos",
    request_body = ProductPayload,
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto atualizado"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state
        .product_service
        .update(
            id,
            &payload.name,
            payload.description.as_deref(),
            payload.cost_price,
            payload.sale_price,
            payload.stock_quantity,
            payload.moves_stock,
            payload.category_id,
        )
        .await?;

    Ok((StatusCode::OK, Json(product)))
}

// DELETE /api/products/{id} — exclusão lógica
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Produtos",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto desativado"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.product_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

// GET /api/products/low-stock
#[utoipa::path(
    get,
    path = "/api/products/low-stock",
    tag = "Produtos",
    params(LimitQuery),
    responses(
        (status = 200, description = "Produtos abaixo do limite de estoque")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_low_stock(
    State(app_state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state
        .product_service
        .find_low_stock(query.limit.unwrap_or(10))
        .await?;
    Ok((StatusCode::OK, Json(products)))
}

// ---
// Payload: ajuste absoluto de estoque
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockPayload {
    #[validate(range(min = 0, message = "A quantidade deve ser maior ou igual a zero."))]
    pub stock_quantity: i32,
}

// PUT /api/products/{id}/stock
#[utoipa::path(
    put,
    path = "/api/products/{id}/stock",
    tag = "Produtos",
    request_body = UpdateStockPayload,
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Estoque ajustado"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_stock(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStockPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state
        .product_service
        .update_stock(id, payload.stock_quantity)
        .await?;

    Ok((StatusCode::OK, Json(product)))
}

// GET /api/products/top-selling
#[utoipa::path(
    get,
    path = "/api/products/top-selling",
    tag = "Produtos",
    params(LimitQuery),
    responses(
        (status = 200, description = "Produtos mais vendidos (quantidade e receita)")
    ),
    security(("api_jwt" = []))
)]
pub async fn top_selling(
    State(app_state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state
        .product_service
        .top_selling(query.limit.unwrap_or(10))
        .await?;
    Ok((StatusCode::OK, Json(entries)))
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockValueResponse {
    pub stock_value: Decimal,
}

// GET /api/products/stock-value
#[utoipa::path(
    get,
    path = "/api/products/stock-value",
    tag = "Produtos",
    responses(
        (status = 200, description = "Valor imobilizado em estoque", body = StockValueResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn stock_value(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let stock_value = app_state.product_service.stock_value().await?;
    Ok((StatusCode::OK, Json(StockValueResponse { stock_value })))
}
