// src/handlers/customers.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination::PaginationParams},
    config::AppState,
};

// ---
// Payload: Cliente
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório."))]
    #[schema(example = "João Silva")]
    pub name: String,

    #[validate(email(message = "Email inválido."))]
    pub email: Option<String>,

    #[validate(length(max = 20, message = "Telefone muito longo."))]
    pub phone: Option<String>,

    #[validate(length(max = 200, message = "Endereço muito longo."))]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCustomersQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    // Busca em nome, e-mail e telefone
    pub search: Option<String>,
}

// GET /api/customers
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "Clientes",
    params(ListCustomersQuery),
    responses(
        (status = 200, description = "Página de clientes")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    Query(query): Query<ListCustomersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let defaults = PaginationParams::default();
    let pagination = PaginationParams::new(
        query.page.unwrap_or(defaults.page),
        query.limit.unwrap_or(defaults.limit),
    );

    let page = app_state
        .customer_service
        .find_all(query.search.as_deref(), pagination)
        .await?;

    Ok((StatusCode::OK, Json(page)))
}

// POST /api/customers
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "Clientes",
    request_body = CustomerPayload,
    responses(
        (status = 201, description = "Cliente criado"),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    Json(payload): Json<CustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let customer = app_state
        .customer_service
        .create(
            &payload.name,
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.address.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

// GET /api/customers/{id}
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state.customer_service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(customer)))
}

// PUT /api/customers/{id}
#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    tag = "Clientes",
    request_body = CustomerPayload,
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente atualizado"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let customer = app_state
        .customer_service
        .update(
            id,
            &payload.name,
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.address.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(customer)))
}

// DELETE /api/customers/{id}
#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.customer_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchByNameQuery {
    pub name: String,
}

// GET /api/customers/search — autocomplete da tela de venda
#[utoipa::path(
    get,
    path = "/api/customers/search",
    tag = "Clientes",
    params(SearchByNameQuery),
    responses(
        (status = 200, description = "Clientes com nome parecido")
    ),
    security(("api_jwt" = []))
)]
pub async fn search_customers(
    State(app_state): State<AppState>,
    Query(query): Query<SearchByNameQuery>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state.customer_service.find_by_name(&query.name).await?;
    Ok((StatusCode::OK, Json(customers)))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

// GET /api/customers/top
#[utoipa::path(
    get,
    path = "/api/customers/top",
    tag = "Clientes",
    params(LimitQuery),
    responses(
        (status = 200, description = "Melhores clientes por faturamento")
    ),
    security(("api_jwt" = []))
)]
pub async fn top_customers(
    State(app_state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state
        .customer_service
        .top_customers(query.limit.unwrap_or(10))
        .await?;
    Ok((StatusCode::OK, Json(entries)))
}

// GET /api/customers/with-receivables
#[utoipa::path(
    get,
    path = "/api/customers/with-receivables",
    tag = "Clientes",
    responses(
        (status = 200, description = "Clientes com contas a receber pendentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn customers_with_receivables(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.customer_service.with_receivables().await?;
    Ok((StatusCode::OK, Json(entries)))
}
