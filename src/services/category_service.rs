// src/services/category_service.rs

use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::{PaginatedResponse, PaginationParams},
    },
    db::CategoryRepository,
    models::category::Category,
};

#[derive(Clone)]
pub struct CategoryService {
    repo: CategoryRepository,
}

impl CategoryService {
    pub fn new(repo: CategoryRepository) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        color: Option<&str>,
    ) -> Result<Category, AppError> {
        self.repo.create(name, description, color).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        color: Option<&str>,
    ) -> Result<Category, AppError> {
        self.repo.update(id, name, description, color).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.soft_delete(id).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Category, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Categoria não encontrada.".into()))
    }

    pub async fn find_all(
        &self,
        pagination: PaginationParams,
    ) -> Result<PaginatedResponse<Category>, AppError> {
        let pagination = pagination.normalized();
        let (categories, total) = self.repo.list_active(pagination).await?;
        Ok(PaginatedResponse::new(categories, total, pagination))
    }

    // Lista completa para os selects do front
    pub async fn find_active(&self) -> Result<Vec<Category>, AppError> {
        self.repo.find_active().await
    }
}
