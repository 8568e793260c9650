// src/handlers/payment_methods.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::sale::PaymentType};

// ---
// Payload: Forma de Pagamento
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodPayload {
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório."))]
    #[schema(example = "Cartão de Crédito")]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "O tipo é obrigatório."))]
    #[schema(example = "Cartão")]
    pub kind: String,

    pub payment_type: PaymentType,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ToggleActivePayload {
    pub active: bool,
}

// GET /api/payment-methods
#[utoipa::path(
    get,
    path = "/api/payment-methods",
    tag = "Formas de Pagamento",
    responses(
        (status = 200, description = "Todas as formas de pagamento")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_payment_methods(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let methods = app_state.payment_method_service.find_all().await?;
    Ok((StatusCode::OK, Json(methods)))
}

// GET /api/payment-methods/active
#[utoipa::path(
    get,
    path = "/api/payment-methods/active",
    tag = "Formas de Pagamento",
    responses(
        (status = 200, description = "Formas de pagamento ativas")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_active_payment_methods(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let methods = app_state.payment_method_service.find_active().await?;
    Ok((StatusCode::OK, Json(methods)))
}

// GET /api/payment-methods/{id}
#[utoipa::path(
    get,
    path = "/api/payment-methods/{id}",
    tag = "Formas de Pagamento",
    params(("id" = Uuid, Path, description = "ID da forma de pagamento")),
    responses(
        (status = 200, description = "Forma de pagamento"),
        (status = 404, description = "Forma de pagamento não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_payment_method(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let method = app_state.payment_method_service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(method)))
}

// POST /api/payment-methods
#[utoipa::path(
    post,
    path = "/api/payment-methods",
    tag = "Formas de Pagamento",
    request_body = PaymentMethodPayload,
    responses(
        (status = 201, description = "Forma de pagamento criada"),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_payment_method(
    State(app_state): State<AppState>,
    Json(payload): Json<PaymentMethodPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let method = app_state
        .payment_method_service
        .create(&payload.name, &payload.kind, payload.payment_type)
        .await?;

    Ok((StatusCode::CREATED, Json(method)))
}

// PUT /api/payment-methods/{id}
#[utoipa::path(
    put,
    path = "/api/payment-methods/{id}",
    tag = "Formas de Pagamento",
    request_body = PaymentMethodPayload,
    params(("id" = Uuid, Path, description = "ID da forma de pagamento")),
    responses(
        (status = 200, description = "Forma de pagamento atualizada"),
        (status = 404, description = "Forma de pagamento não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_payment_method(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PaymentMethodPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let method = app_state
        .payment_method_service
        .update(id, &payload.name, &payload.kind, payload.payment_type)
        .await?;

    Ok((StatusCode::OK, Json(method)))
}

// DELETE /api/payment-methods/{id}
#[utoipa::path(
    delete,
    path = "/api/payment-methods/{id}",
    tag = "Formas de Pagamento",
    params(("id" = Uuid, Path, description = "ID da forma de pagamento")),
    responses(
        (status = 204, description = "Forma de pagamento removida"),
        (status = 404, description = "Forma de pagamento não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_payment_method(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.payment_method_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// PUT /api/payment-methods/{id}/active — liga/desliga sem remover
#[utoipa::path(
    put,
    path = "/api/payment-methods/{id}/active",
    tag = "Formas de Pagamento",
    request_body = ToggleActivePayload,
    params(("id" = Uuid, Path, description = "ID da forma de pagamento")),
    responses(
        (status = 200, description = "Status alterado"),
        (status = 404, description = "Forma de pagamento não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_payment_method(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ToggleActivePayload>,
) -> Result<impl IntoResponse, AppError> {
    let method = app_state
        .payment_method_service
        .toggle_active(id, payload.active)
        .await?;

    Ok((StatusCode::OK, Json(method)))
}
