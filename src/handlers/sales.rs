// src/handlers/sales.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination::PaginationParams},
    config::AppState,
    models::sale::{CreateSalePayload, PaymentType, SaleFilters, SaleStatus, UpdateSalePayload},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListSalesQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub payment_type: Option<PaymentType>,
    pub status: Option<SaleStatus>,
    pub customer_id: Option<Uuid>,
}

// GET /api/sales
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Vendas",
    params(ListSalesQuery),
    responses(
        (status = 200, description = "Página de vendas, com o cliente embutido")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    Query(query): Query<ListSalesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let defaults = PaginationParams::default();
    let pagination = PaginationParams::new(
        query.page.unwrap_or(defaults.page),
        query.limit.unwrap_or(defaults.limit),
    );

    let filters = SaleFilters {
        start_date: query.start_date,
        end_date: query.end_date,
        payment_type: query.payment_type,
        status: query.status,
        customer_id: query.customer_id,
    };

    let page = app_state.sale_service.find_all(filters, pagination).await?;
    Ok((StatusCode::OK, Json(page)))
}

// POST /api/sales
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Vendas",
    request_body = CreateSalePayload,
    responses(
        (status = 201, description = "Venda criada com itens e baixa de estoque"),
        (status = 400, description = "Dados inválidos"),
        (status = 422, description = "Estoque insuficiente ou produto inativo")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let sale = app_state.sale_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

// GET /api/sales/{id}
#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    tag = "Vendas",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda completa: cliente e itens com produto"),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sale(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state.sale_service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(sale)))
}

// PUT /api/sales/{id}
#[utoipa::path(
    put,
    path = "/api/sales/{id}",
    tag = "Vendas",
    request_body = UpdateSalePayload,
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Cabeçalho da venda atualizado"),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_sale(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let sale = app_state.sale_service.update(id, payload).await?;
    Ok((StatusCode::OK, Json(sale)))
}

// DELETE /api/sales/{id}
#[utoipa::path(
    delete,
    path = "/api/sales/{id}",
    tag = "Vendas",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 204, description = "Venda removida (itens caem em cascata)"),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_sale(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.sale_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/sales/{id}/refund
#[utoipa::path(
    post,
    path = "/api/sales/{id}/refund",
    tag = "Vendas",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda estornada, estoque devolvido"),
        (status = 404, description = "Venda não encontrada"),
        (status = 422, description = "Venda já estornada ou cancelada")
    ),
    security(("api_jwt" = []))
)]
pub async fn refund_sale(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state.sale_service.refund(id).await?;
    Ok((StatusCode::OK, Json(sale)))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

// GET /api/sales/stats
#[utoipa::path(
    get,
    path = "/api/sales/stats",
    tag = "Vendas",
    params(StatsQuery),
    responses(
        (status = 200, description = "Totais do período (vendas, lucro, contagem)")
    ),
    security(("api_jwt" = []))
)]
pub async fn sales_stats(
    State(app_state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state
        .sale_service
        .stats(query.start_date, query.end_date)
        .await?;
    Ok((StatusCode::OK, Json(stats)))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ChartQuery {
    pub months: Option<u32>,
}

// GET /api/sales/chart
#[utoipa::path(
    get,
    path = "/api/sales/chart",
    tag = "Vendas",
    params(ChartQuery),
    responses(
        (status = 200, description = "Vendas concluídas agrupadas por mês")
    ),
    security(("api_jwt" = []))
)]
pub async fn sales_chart(
    State(app_state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state
        .sale_service
        .chart_data(query.months.unwrap_or(12))
        .await?;
    Ok((StatusCode::OK, Json(entries)))
}
