// src/services/payment_method_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::PaymentMethodRepository,
    models::{payment_method::PaymentMethod, sale::PaymentType},
};

#[derive(Clone)]
pub struct PaymentMethodService {
    repo: PaymentMethodRepository,
}

impl PaymentMethodService {
    pub fn new(repo: PaymentMethodRepository) -> Self {
        Self { repo }
    }

    pub async fn find_all(&self) -> Result<Vec<PaymentMethod>, AppError> {
        self.repo.find_all().await
    }

    pub async fn find_active(&self) -> Result<Vec<PaymentMethod>, AppError> {
        self.repo.find_active().await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<PaymentMethod, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Forma de pagamento não encontrada.".into()))
    }

    pub async fn create(
        &self,
        name: &str,
        kind: &str,
        payment_type: PaymentType,
    ) -> Result<PaymentMethod, AppError> {
        self.repo.create(name, kind, payment_type).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        kind: &str,
        payment_type: PaymentType,
    ) -> Result<PaymentMethod, AppError> {
        self.repo.update(id, name, kind, payment_type).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete(id).await
    }

    pub async fn toggle_active(&self, id: Uuid, active: bool) -> Result<PaymentMethod, AppError> {
        self.repo.set_active(id, active).await
    }
}
