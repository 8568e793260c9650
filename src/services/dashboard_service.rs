// src/services/dashboard_service.rs

use chrono::{Duration, Months, Utc};
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{DashboardRepository, FinancialRepository, ProductRepository, SaleRepository},
    models::{
        dashboard::{
            ActivityEntry, DashboardStats, DueDateKind, FinancialSummary, LowStockAlert,
            SalesChartEntry, UpcomingDueDate,
        },
        product::TopProductEntry,
        sale::PaymentType,
    },
    services::{product_service::LOW_STOCK_THRESHOLD, sale_service::group_by_month},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
    sale_repo: SaleRepository,
    product_repo: ProductRepository,
    financial_repo: FinancialRepository,
}

impl DashboardService {
    pub fn new(
        repo: DashboardRepository,
        sale_repo: SaleRepository,
        product_repo: ProductRepository,
        financial_repo: FinancialRepository,
    ) -> Self {
        Self {
            repo,
            sale_repo,
            product_repo,
            financial_repo,
        }
    }

    // Cartões de resumo. Sem cache: recalculado a cada carga da tela.
    pub async fn get_stats(&self) -> Result<DashboardStats, AppError> {
        self.financial_repo.sweep_overdue().await?;
        self.repo.get_stats(LOW_STOCK_THRESHOLD).await
    }

    pub async fn sales_chart(&self, months: u32) -> Result<Vec<SalesChartEntry>, AppError> {
        let start = Utc::now()
            .checked_sub_months(Months::new(months))
            .unwrap_or_else(Utc::now);
        let rows = self.sale_repo.completed_totals_since(start).await?;
        Ok(group_by_month(&rows))
    }

    pub async fn top_products(&self, limit: i64) -> Result<Vec<TopProductEntry>, AppError> {
        self.product_repo.top_selling(limit).await
    }

    pub async fn financial_summary(&self) -> Result<FinancialSummary, AppError> {
        self.financial_repo.sweep_overdue().await?;

        let (total_payables, total_receivables, overdue_amount) =
            self.repo.financial_sums().await?;

        Ok(FinancialSummary {
            net_balance: total_receivables - total_payables,
            total_payables,
            total_receivables,
            overdue_amount,
        })
    }

    // Contas dos dois lados que vencem na janela, intercaladas por vencimento.
    pub async fn upcoming_due_dates(&self, days: i64) -> Result<Vec<UpcomingDueDate>, AppError> {
        self.financial_repo.sweep_overdue().await?;

        let until = (Utc::now() + Duration::days(days)).date_naive();

        let payables = self.repo.upcoming_payables(until).await?;
        let receivables = self.repo.upcoming_receivables(until).await?;

        let mut upcoming: Vec<UpcomingDueDate> = payables
            .into_iter()
            .map(|p| UpcomingDueDate {
                kind: DueDateKind::Payable,
                name: p.name,
                amount: p.amount,
                due_date: p.due_date,
                customer_name: None,
            })
            .collect();

        upcoming.extend(receivables.into_iter().map(
            |(name, amount, due_date, customer_name)| UpcomingDueDate {
                kind: DueDateKind::Receivable,
                name,
                amount,
                due_date,
                customer_name,
            },
        ));

        sort_by_due_date(&mut upcoming);
        Ok(upcoming)
    }

    pub async fn low_stock_alerts(&self) -> Result<Vec<LowStockAlert>, AppError> {
        let mut alerts = self.repo.low_stock(LOW_STOCK_THRESHOLD).await?;
        for alert in &mut alerts {
            alert.stock_value = Decimal::from(alert.stock_quantity) * alert.cost_price;
        }
        Ok(alerts)
    }

    // Feed de atividade: por enquanto só as vendas mais recentes.
    pub async fn recent_activity(&self, limit: i64) -> Result<Vec<ActivityEntry>, AppError> {
        let rows = self.repo.recent_sales(limit).await?;

        Ok(rows
            .into_iter()
            .map(|(id, amount, date, payment_type, customer_name)| {
                let modality = match payment_type {
                    PaymentType::Cash => "à vista",
                    PaymentType::Credit => "a prazo",
                };
                let customer =
                    customer_name.unwrap_or_else(|| "Cliente não identificado".to_string());

                ActivityEntry {
                    id,
                    kind: "sale".to_string(),
                    amount,
                    date,
                    description: format!("Venda {} - {}", modality, customer),
                }
            })
            .collect())
    }
}

// Ordenação estável: empates de data mantêm a pagar antes de a receber.
fn sort_by_due_date(upcoming: &mut [UpcomingDueDate]) {
    upcoming.sort_by_key(|entry| entry.due_date);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(kind: DueDateKind, name: &str, day: u32) -> UpcomingDueDate {
        UpcomingDueDate {
            kind,
            name: name.to_string(),
            amount: Decimal::new(10000, 2),
            due_date: NaiveDate::from_ymd_opt(2026, 8, day).unwrap(),
            customer_name: None,
        }
    }

    #[test]
    fn vencimentos_ordenados_por_data() {
        let mut upcoming = vec![
            entry(DueDateKind::Payable, "Aluguel", 20),
            entry(DueDateKind::Receivable, "Venda a prazo", 10),
            entry(DueDateKind::Payable, "Energia", 15),
        ];
        sort_by_due_date(&mut upcoming);

        let names: Vec<_> = upcoming.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Venda a prazo", "Aluguel", "Energia"]);
    }

    #[test]
    fn empate_de_data_mantem_ordem_de_entrada() {
        let mut upcoming = vec![
            entry(DueDateKind::Payable, "Aluguel", 10),
            entry(DueDateKind::Receivable, "Venda a prazo", 10),
        ];
        sort_by_due_date(&mut upcoming);

        assert_eq!(upcoming[0].kind, DueDateKind::Payable);
        assert_eq!(upcoming[1].kind, DueDateKind::Receivable);
    }
}
