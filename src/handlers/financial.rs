// src/handlers/financial.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination::PaginationParams},
    config::AppState,
    models::financial::{
        BillStatus, PayableFilters, ReceivableFilters, RecurringInterval,
    },
};

// ---
// Validação Customizada
// ---
fn validate_positive(value: &Decimal) -> Result<(), validator::ValidationError> {
    if *value <= Decimal::ZERO {
        let mut err = validator::ValidationError::new("range");
        err.message = Some("O valor deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: Conta a Pagar
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayablePayload {
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório."))]
    #[schema(example = "Aluguel da loja")]
    pub name: String,

    #[validate(custom(function = "validate_positive"))]
    #[schema(example = "1800.00")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-09-05")]
    pub due_date: NaiveDate,

    #[validate(length(max = 500, message = "Descrição muito longa."))]
    pub description: Option<String>,

    #[serde(default)]
    pub is_recurring: bool,

    pub recurring_interval: Option<RecurringInterval>,
}

impl PayablePayload {
    // Regra cruzada: conta recorrente precisa do intervalo.
    fn validate_consistency(&self) -> Result<(), validator::ValidationError> {
        if self.is_recurring && self.recurring_interval.is_none() {
            let mut err = validator::ValidationError::new("RecurringIntervalRequired");
            err.message = Some(
                "Intervalo de recorrência é obrigatório para contas recorrentes.".into(),
            );
            return Err(err);
        }
        Ok(())
    }
}

fn check_payable(payload: &PayablePayload) -> Result<(), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    payload.validate_consistency().map_err(|e| {
        let mut errors = validator::ValidationErrors::new();
        errors.add("recurringInterval", e);
        AppError::ValidationError(errors)
    })
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListPayablesQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<BillStatus>,
    pub is_recurring: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// GET /api/financial/payables
#[utoipa::path(
    get,
    path = "/api/financial/payables",
    tag = "Financeiro",
    params(ListPayablesQuery),
    responses(
        (status = 200, description = "Página de contas a pagar, ordenada por vencimento")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_payables(
    State(app_state): State<AppState>,
    Query(query): Query<ListPayablesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let defaults = PaginationParams::default();
    let pagination = PaginationParams::new(
        query.page.unwrap_or(defaults.page),
        query.limit.unwrap_or(defaults.limit),
    );

    let filters = PayableFilters {
        status: query.status,
        is_recurring: query.is_recurring,
        start_date: query.start_date,
        end_date: query.end_date,
    };

    let page = app_state
        .financial_service
        .find_payables(filters, pagination)
        .await?;

    Ok((StatusCode::OK, Json(page)))
}

// POST /api/financial/payables
#[utoipa::path(
    post,
    path = "/api/financial/payables",
    tag = "Financeiro",
    request_body = PayablePayload,
    responses(
        (status = 201, description = "Conta a pagar criada"),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_payable(
    State(app_state): State<AppState>,
    Json(payload): Json<PayablePayload>,
) -> Result<impl IntoResponse, AppError> {
    check_payable(&payload)?;

    let payable = app_state
        .financial_service
        .create_payable(
            &payload.name,
            payload.amount,
            payload.due_date,
            payload.description.as_deref(),
            payload.is_recurring,
            payload.recurring_interval,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(payable)))
}

// GET /api/financial/payables/{id}
#[utoipa::path(
    get,
    path = "/api/financial/payables/{id}",
    tag = "Financeiro",
    params(("id" = Uuid, Path, description = "ID da conta a pagar")),
    responses(
        (status = 200, description = "Conta a pagar"),
        (status = 404, description = "Conta a pagar não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_payable(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let payable = app_state.financial_service.find_payable(id).await?;
    Ok((StatusCode::OK, Json(payable)))
}

// PUT /api/financial/payables/{id}
#[utoipa::path(
    put,
    path = "/api/financial/payables/{id}",
    tag = "Financeiro",
    request_body = PayablePayload,
    params(("id" = Uuid, Path, description = "ID da conta a pagar")),
    responses(
        (status = 200, description = "Conta a pagar atualizada"),
        (status = 404, description = "Conta a pagar não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_payable(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PayablePayload>,
) -> Result<impl IntoResponse, AppError> {
    check_payable(&payload)?;

    let payable = app_state
        .financial_service
        .update_payable(
            id,
            &payload.name,
            payload.amount,
            payload.due_date,
            payload.description.as_deref(),
            payload.is_recurring,
            payload.recurring_interval,
        )
        .await?;

    Ok((StatusCode::OK, Json(payable)))
}

// DELETE /api/financial/payables/{id}
#[utoipa::path(
    delete,
    path = "/api/financial/payables/{id}",
    tag = "Financeiro",
    params(("id" = Uuid, Path, description = "ID da conta a pagar")),
    responses(
        (status = 204, description = "Conta a pagar removida"),
        (status = 404, description = "Conta a pagar não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_payable(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.financial_service.delete_payable(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/financial/payables/{id}/pay
// Quitar uma conta recorrente abre a próxima ocorrência.
#[utoipa::path(
    post,
    path = "/api/financial/payables/{id}/pay",
    tag = "Financeiro",
    params(("id" = Uuid, Path, description = "ID da conta a pagar")),
    responses(
        (status = 200, description = "Conta quitada"),
        (status = 404, description = "Conta a pagar não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn pay_payable(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let payable = app_state.financial_service.pay_payable(id).await?;
    Ok((StatusCode::OK, Json(payable)))
}

// ---
// Payload: Conta a Receber
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceivablePayload {
    pub customer_id: Option<Uuid>,
    pub sale_id: Option<Uuid>,

    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório."))]
    #[schema(example = "Venda a prazo - João Silva")]
    pub name: String,

    #[validate(custom(function = "validate_positive"))]
    #[schema(example = "150.00")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-09-10")]
    pub due_date: NaiveDate,

    #[validate(length(max = 500, message = "Descrição muito longa."))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListReceivablesQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<BillStatus>,
    pub customer_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// GET /api/financial/receivables
#[utoipa::path(
    get,
    path = "/api/financial/receivables",
    tag = "Financeiro",
    params(ListReceivablesQuery),
    responses(
        (status = 200, description = "Página de contas a receber, com o cliente embutido")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_receivables(
    State(app_state): State<AppState>,
    Query(query): Query<ListReceivablesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let defaults = PaginationParams::default();
    let pagination = PaginationParams::new(
        query.page.unwrap_or(defaults.page),
        query.limit.unwrap_or(defaults.limit),
    );

    let filters = ReceivableFilters {
        status: query.status,
        customer_id: query.customer_id,
        start_date: query.start_date,
        end_date: query.end_date,
    };

    let page = app_state
        .financial_service
        .find_receivables(filters, pagination)
        .await?;

    Ok((StatusCode::OK, Json(page)))
}

// POST /api/financial/receivables
#[utoipa::path(
    post,
    path = "/api/financial/receivables",
    tag = "Financeiro",
    request_body = ReceivablePayload,
    responses(
        (status = 201, description = "Conta a receber criada"),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_receivable(
    State(app_state): State<AppState>,
    Json(payload): Json<ReceivablePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let receivable = app_state
        .financial_service
        .create_receivable(
            payload.customer_id,
            payload.sale_id,
            &payload.name,
            payload.amount,
            payload.due_date,
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(receivable)))
}

// GET /api/financial/receivables/{id}
#[utoipa::path(
    get,
    path = "/api/financial/receivables/{id}",
    tag = "Financeiro",
    params(("id" = Uuid, Path, description = "ID da conta a receber")),
    responses(
        (status = 200, description = "Conta a receber com o cliente embutido"),
        (status = 404, description = "Conta a receber não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_receivable(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let receivable = app_state.financial_service.find_receivable(id).await?;
    Ok((StatusCode::OK, Json(receivable)))
}

// PUT /api/financial/receivables/{id}
#[utoipa::path(
    put,
    path = "/api/financial/receivables/{id}",
    tag = "Financeiro",
    request_body = ReceivablePayload,
    params(("id" = Uuid, Path, description = "ID da conta a receber")),
    responses(
        (status = 200, description = "Conta a receber atualizada"),
        (status = 404, description = "Conta a receber não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_receivable(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReceivablePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let receivable = app_state
        .financial_service
        .update_receivable(
            id,
            payload.customer_id,
            payload.sale_id,
            &payload.name,
            payload.amount,
            payload.due_date,
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(receivable)))
}

// DELETE /api/financial/receivables/{id}
#[utoipa::path(
    delete,
    path = "/api/financial/receivables/{id}",
    tag = "Financeiro",
    params(("id" = Uuid, Path, description = "ID da conta a receber")),
    responses(
        (status = 204, description = "Conta a receber removida"),
        (status = 404, description = "Conta a receber não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_receivable(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.financial_service.delete_receivable(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/financial/receivables/{id}/pay
#[utoipa::path(
    post,
    path = "/api/financial/receivables/{id}/pay",
    tag = "Financeiro",
    params(("id" = Uuid, Path, description = "ID da conta a receber")),
    responses(
        (status = 200, description = "Conta recebida"),
        (status = 404, description = "Conta a receber não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn pay_receivable(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let receivable = app_state.financial_service.pay_receivable(id).await?;
    Ok((StatusCode::OK, Json(receivable)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(is_recurring: bool, interval: Option<RecurringInterval>) -> PayablePayload {
        PayablePayload {
            name: "Aluguel".into(),
            amount: Decimal::new(180000, 2),
            due_date: NaiveDate::from_ymd_opt(2026, 9, 5).unwrap(),
            description: None,
            is_recurring,
            recurring_interval: interval,
        }
    }

    #[test]
    fn recorrente_sem_intervalo_e_invalida() {
        assert!(check_payable(&payload(true, None)).is_err());
        assert!(check_payable(&payload(true, Some(RecurringInterval::Monthly))).is_ok());
        assert!(check_payable(&payload(false, None)).is_ok());
    }

    #[test]
    fn valor_zero_e_invalido() {
        let mut p = payload(false, None);
        p.amount = Decimal::ZERO;
        assert!(check_payable(&p).is_err());

        p.amount = Decimal::new(-100, 2);
        assert!(check_payable(&p).is_err());
    }
}
