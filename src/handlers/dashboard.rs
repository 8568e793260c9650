// src/handlers/dashboard.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::{DashboardStats, FinancialSummary},
};

// GET /api/dashboard/stats
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Cartões de resumo da tela inicial", body = DashboardStats)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_stats(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.dashboard_service.get_stats().await?;
    Ok((StatusCode::OK, Json(stats)))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ChartQuery {
    pub months: Option<u32>,
}

// GET /api/dashboard/sales-chart
#[utoipa::path(
    get,
    path = "/api/dashboard/sales-chart",
    tag = "Dashboard",
    params(ChartQuery),
    responses(
        (status = 200, description = "Vendas concluídas dos últimos meses, agrupadas por mês")
    ),
    security(("api_jwt" = []))
)]
pub async fn sales_chart(
    State(app_state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state
        .dashboard_service
        .sales_chart(query.months.unwrap_or(12))
        .await?;
    Ok((StatusCode::OK, Json(entries)))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

// GET /api/dashboard/top-products
#[utoipa::path(
    get,
    path = "/api/dashboard/top-products",
    tag = "Dashboard",
    params(LimitQuery),
    responses(
        (status = 200, description = "Produtos mais vendidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn top_products(
    State(app_state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state
        .dashboard_service
        .top_products(query.limit.unwrap_or(10))
        .await?;
    Ok((StatusCode::OK, Json(entries)))
}

// GET /api/dashboard/financial-summary
#[utoipa::path(
    get,
    path = "/api/dashboard/financial-summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Totais do financeiro", body = FinancialSummary)
    ),
    security(("api_jwt" = []))
)]
pub async fn financial_summary(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.dashboard_service.financial_summary().await?;
    Ok((StatusCode::OK, Json(summary)))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct UpcomingQuery {
    pub days: Option<i64>,
}

// GET /api/dashboard/upcoming-due-dates
#[utoipa::path(
    get,
    path = "/api/dashboard/upcoming-due-dates",
    tag = "Dashboard",
    params(UpcomingQuery),
    responses(
        (status = 200, description = "Contas que vencem na janela, ordenadas por vencimento")
    ),
    security(("api_jwt" = []))
)]
pub async fn upcoming_due_dates(
    State(app_state): State<AppState>,
    Query(query): Query<UpcomingQuery>,
) -> Result<impl IntoResponse, AppError> {
    let upcoming = app_state
        .dashboard_service
        .upcoming_due_dates(query.days.unwrap_or(30))
        .await?;
    Ok((StatusCode::OK, Json(upcoming)))
}

// GET /api/dashboard/low-stock
#[utoipa::path(
    get,
    path = "/api/dashboard/low-stock",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Alertas de estoque baixo, com o valor parado em estoque")
    ),
    security(("api_jwt" = []))
)]
pub async fn low_stock_alerts(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let alerts = app_state.dashboard_service.low_stock_alerts().await?;
    Ok((StatusCode::OK, Json(alerts)))
}

// GET /api/dashboard/recent-activity
#[utoipa::path(
    get,
    path = "/api/dashboard/recent-activity",
    tag = "Dashboard",
    params(LimitQuery),
    responses(
        (status = 200, description = "Últimas movimentações (vendas)")
    ),
    security(("api_jwt" = []))
)]
pub async fn recent_activity(
    State(app_state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse, AppError> {
    let activity = app_state
        .dashboard_service
        .recent_activity(query.limit.unwrap_or(10))
        .await?;
    Ok((StatusCode::OK, Json(activity)))
}
