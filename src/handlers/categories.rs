// src/handlers/categories.rs

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
// Payload: CreateCategory
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório."))]
    #[schema(example = "Bebidas")]
    pub name: String,

    #[validate(length(max = 500, message = "Descrição muito longa."))]
    pub description: Option<String>,

    #[schema(example = "#22c55e")]
    pub color: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListQuery {
    fn pagination(&self) -> PaginationParams {
        let defaults = PaginationParams::default();
        PaginationParams::new(
            self.page.unwrap_or(defaults.page),
            self.limit.unwrap_or(defaults.limit),
        )
    }
}

// GET /api/categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Categorias",
    params(ListQuery),
    responses(
        (status = 200, description = "Página de categorias ativas")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state
        .category_service
        .find_all(query.pagination())
        .await?;

    Ok((StatusCode::OK, Json(page)))
}

// GET /api/categories/active — lista completa para selects
#[utoipa::path(
    get,
    path = "/api/categories/active",
    tag = "Categorias",
    responses(
        (status = 200, description = "Todas as categorias ativas")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_active_categories(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.category_service.find_active().await?;
    Ok((StatusCode::OK, Json(categories)))
}

// POST /api/categories
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Categorias",
    request_body = CategoryPayload,
    responses(
        (status = 201, description = "Categoria criada"),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let category = app_state
        .category_service
        .create(
            &payload.name,
            payload.description.as_deref(),
            payload.color.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

// PUT /api/categories/{id}
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "Categorias",
    request_body = CategoryPayload,
    params(("id" = Uuid, Path, description = "ID da categoria")),
    responses(
        (status = 200, description = "Categoria atualizada"),
        (status = 404, description = "Categoria não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let category = app_state
        .category_service
        .update(
            id,
            &payload.name,
            payload.description.as_deref(),
            payload.color.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(category)))
}

// DELETE /api/categories/{id} — exclusão lógica
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "Categorias",
    params(("id" = Uuid, Path, description = "ID da categoria")),
    responses(
        (status = 204, description = "Categoria desativada"),
        (status = 404, description = "Categoria não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.category_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
