// src/services/financial_service.rs

use chrono::{Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::{PaginatedResponse, PaginationParams},
    },
    db::{CustomerRepository, FinancialRepository},
    models::financial::{
        Payable, PayableFilters, Receivable, ReceivableFilters, RecurringInterval,
    },
};

#[derive(Clone)]
pub struct FinancialService {
    pool: PgPool,
    repo: FinancialRepository,
    customer_repo: CustomerRepository,
}

impl FinancialService {
    pub fn new(
        pool: PgPool,
        repo: FinancialRepository,
        customer_repo: CustomerRepository,
    ) -> Self {
        Self {
            pool,
            repo,
            customer_repo,
        }
    }

    // =========================================================================
    //  CONTAS A PAGAR
    // =========================================================================

    pub async fn create_payable(
        &self,
        name: &str,
        amount: Decimal,
        due_date: NaiveDate,
        description: Option<&str>,
        is_recurring: bool,
        recurring_interval: Option<RecurringInterval>,
    ) -> Result<Payable, AppError> {
        self.repo
            .create_payable(
                name,
                amount,
                due_date,
                description,
                is_recurring,
                recurring_interval,
            )
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_payable(
        &self,
        id: Uuid,
        name: &str,
        amount: Decimal,
        due_date: NaiveDate,
        description: Option<&str>,
        is_recurring: bool,
        recurring_interval: Option<RecurringInterval>,
    ) -> Result<Payable, AppError> {
        self.repo
            .update_payable(
                id,
                name,
                amount,
                due_date,
                description,
                is_recurring,
                recurring_interval,
            )
            .await
    }

    pub async fn delete_payable(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete_payable(id).await
    }

    pub async fn find_payable(&self, id: Uuid) -> Result<Payable, AppError> {
        self.repo
            .find_payable(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conta a pagar não encontrada.".into()))
    }

    pub async fn find_payables(
        &self,
        filters: PayableFilters,
        pagination: PaginationParams,
    ) -> Result<PaginatedResponse<Payable>, AppError> {
        // Antes de listar, o que venceu vira OVERDUE
        self.repo.sweep_overdue().await?;

        let pagination = pagination.normalized();
        let (payables, total) = self.repo.list_payables(&filters, pagination).await?;
        Ok(PaginatedResponse::new(payables, total, pagination))
    }

    // Quitar uma conta recorrente abre a próxima ocorrência automaticamente.
    pub async fn pay_payable(&self, id: Uuid) -> Result<Payable, AppError> {
        let paid = self.repo.mark_payable_paid(id, Utc::now()).await?;

        if paid.is_recurring {
            if let Some(interval) = paid.recurring_interval {
                let next_due = next_due_date(paid.due_date, interval);
                self.repo
                    .create_payable(
                        &paid.name,
                        paid.amount,
                        next_due,
                        paid.description.as_deref(),
                        true,
                        Some(interval),
                    )
                    .await?;
            }
        }

        Ok(paid)
    }

    // =========================================================================
    //  CONTAS A RECEBER
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn create_receivable(
        &self,
        customer_id: Option<Uuid>,
        sale_id: Option<Uuid>,
        name: &str,
        amount: Decimal,
        due_date: NaiveDate,
        description: Option<&str>,
    ) -> Result<Receivable, AppError> {
        self.repo
            .create_receivable(
                &self.pool,
                customer_id,
                sale_id,
                name,
                amount,
                due_date,
                description,
            )
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_receivable(
        &self,
        id: Uuid,
        customer_id: Option<Uuid>,
        sale_id: Option<Uuid>,
        name: &str,
        amount: Decimal,
        due_date: NaiveDate,
        description: Option<&str>,
    ) -> Result<Receivable, AppError> {
        self.repo
            .update_receivable(id, customer_id, sale_id, name, amount, due_date, description)
            .await
    }

    pub async fn delete_receivable(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete_receivable(id).await
    }

    pub async fn find_receivable(&self, id: Uuid) -> Result<Receivable, AppError> {
        let mut receivable = self
            .repo
            .find_receivable(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conta a receber não encontrada.".into()))?;

        if let Some(customer_id) = receivable.customer_id {
            receivable.customer = self.customer_repo.find_by_id(customer_id).await?;
        }
        Ok(receivable)
    }

    pub async fn find_receivables(
        &self,
        filters: ReceivableFilters,
        pagination: PaginationParams,
    ) -> Result<PaginatedResponse<Receivable>, AppError> {
        self.repo.sweep_overdue().await?;

        let pagination = pagination.normalized();
        let (mut receivables, total) = self.repo.list_receivables(&filters, pagination).await?;

        // Junta os clientes pela id, numa segunda consulta.
        let mut customer_ids: Vec<Uuid> =
            receivables.iter().filter_map(|r| r.customer_id).collect();
        customer_ids.sort();
        customer_ids.dedup();

        if !customer_ids.is_empty() {
            let customers = self.customer_repo.find_by_ids(&customer_ids).await?;
            for receivable in &mut receivables {
                receivable.customer = receivable
                    .customer_id
                    .and_then(|id| customers.iter().find(|c| c.id == id).cloned());
            }
        }

        Ok(PaginatedResponse::new(receivables, total, pagination))
    }

    pub async fn pay_receivable(&self, id: Uuid) -> Result<Receivable, AppError> {
        self.repo.mark_receivable_paid(id, Utc::now()).await
    }
}

// Próximo vencimento de uma conta recorrente. O chrono ajusta fim de mês
// sozinho (31/01 + 1 mês = 28/02).
fn next_due_date(due_date: NaiveDate, interval: RecurringInterval) -> NaiveDate {
    let months = match interval {
        RecurringInterval::Monthly => 1,
        RecurringInterval::Quarterly => 3,
        RecurringInterval::Yearly => 12,
    };
    due_date
        .checked_add_months(Months::new(months))
        .unwrap_or(due_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn recorrencia_mensal_trimestral_e_anual() {
        let due = date(2026, 3, 10);
        assert_eq!(
            next_due_date(due, RecurringInterval::Monthly),
            date(2026, 4, 10)
        );
        assert_eq!(
            next_due_date(due, RecurringInterval::Quarterly),
            date(2026, 6, 10)
        );
        assert_eq!(
            next_due_date(due, RecurringInterval::Yearly),
            date(2027, 3, 10)
        );
    }

    #[test]
    fn recorrencia_ajusta_fim_de_mes() {
        assert_eq!(
            next_due_date(date(2026, 1, 31), RecurringInterval::Monthly),
            date(2026, 2, 28)
        );
        assert_eq!(
            next_due_date(date(2024, 1, 31), RecurringInterval::Monthly),
            date(2024, 2, 29)
        );
    }

    #[test]
    fn recorrencia_vira_o_ano() {
        assert_eq!(
            next_due_date(date(2026, 11, 15), RecurringInterval::Quarterly),
            date(2027, 2, 15)
        );
    }
}
