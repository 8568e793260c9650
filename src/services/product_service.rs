// src/services/product_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::{PaginatedResponse, PaginationParams},
    },
    db::{CategoryRepository, ProductRepository},
    models::product::{Product, ProductFilters, TopProductEntry},
};

// Abaixo de 10 unidades o produto entra nos alertas de estoque baixo.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

#[derive(Clone)]
pub struct ProductService {
    repo: ProductRepository,
    category_repo: CategoryRepository,
}

impl ProductService {
    pub fn new(repo: ProductRepository, category_repo: CategoryRepository) -> Self {
        Self {
            repo,
            category_repo,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        cost_price: Decimal,
        sale_price: Decimal,
        stock_quantity: i32,
        moves_stock: bool,
        category_id: Option<Uuid>,
    ) -> Result<Product, AppError> {
        self.repo
            .create(
                name,
                description,
                cost_price,
                sale_price,
                stock_quantity,
                moves_stock,
                category_id,
            )
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        cost_price: Decimal,
        sale_price: Decimal,
        stock_quantity: i32,
        moves_stock: bool,
        category_id: Option<Uuid>,
    ) -> Result<Product, AppError> {
        self.repo
            .update(
                id,
                name,
                description,
                cost_price,
                sale_price,
                stock_quantity,
                moves_stock,
                category_id,
            )
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.soft_delete(id).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Product, AppError> {
        let mut product = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Produto não encontrado.".into()))?;

        if let Some(category_id) = product.category_id {
            product.category = self.category_repo.find_by_id(category_id).await?;
        }
        Ok(product)
    }

    // Listagem paginada com a categoria embutida em cada produto.
    pub async fn find_all(
        &self,
        filters: ProductFilters,
        pagination: PaginationParams,
    ) -> Result<PaginatedResponse<Product>, AppError> {
        let pagination = pagination.normalized();
        let (mut products, total) = self
            .repo
            .list(&filters, LOW_STOCK_THRESHOLD, pagination)
            .await?;

        // Junta as categorias pela id, numa segunda consulta.
        let mut category_ids: Vec<Uuid> =
            products.iter().filter_map(|p| p.category_id).collect();
        category_ids.sort();
        category_ids.dedup();

        if !category_ids.is_empty() {
            let categories = self.category_repo.find_by_ids(&category_ids).await?;
            for product in &mut products {
                product.category = product
                    .category_id
                    .and_then(|id| categories.iter().find(|c| c.id == id).cloned());
            }
        }

        Ok(PaginatedResponse::new(products, total, pagination))
    }

    pub async fn find_low_stock(&self, limit: i64) -> Result<Vec<Product>, AppError> {
        self.repo.find_low_stock(LOW_STOCK_THRESHOLD, limit).await
    }

    pub async fn update_stock(&self, id: Uuid, quantity: i32) -> Result<Product, AppError> {
        self.repo.update_stock(id, quantity).await
    }

    pub async fn top_selling(&self, limit: i64) -> Result<Vec<TopProductEntry>, AppError> {
        self.repo.top_selling(limit).await
    }

    pub async fn stock_value(&self) -> Result<Decimal, AppError> {
        self.repo.stock_value().await
    }
}
