// src/services/customer_service.rs

use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::{PaginatedResponse, PaginationParams},
    },
    db::CustomerRepository,
    models::customer::{Customer, CustomerReceivablesEntry, TopCustomerEntry},
};

#[derive(Clone)]
pub struct CustomerService {
    repo: CustomerRepository,
}

impl CustomerService {
    pub fn new(repo: CustomerRepository) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Customer, AppError> {
        self.repo.create(name, email, phone, address).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Customer, AppError> {
        self.repo.update(id, name, email, phone, address).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete(id).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Customer, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cliente não encontrado.".into()))
    }

    pub async fn find_all(
        &self,
        search: Option<&str>,
        pagination: PaginationParams,
    ) -> Result<PaginatedResponse<Customer>, AppError> {
        let pagination = pagination.normalized();
        let (customers, total) = self.repo.list(search, pagination).await?;
        Ok(PaginatedResponse::new(customers, total, pagination))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Customer>, AppError> {
        self.repo.find_by_name(name).await
    }

    pub async fn top_customers(&self, limit: i64) -> Result<Vec<TopCustomerEntry>, AppError> {
        self.repo.top_customers(limit).await
    }

    pub async fn with_receivables(&self) -> Result<Vec<CustomerReceivablesEntry>, AppError> {
        self.repo.with_pending_receivables().await
    }
}
