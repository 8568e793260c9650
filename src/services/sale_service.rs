// src/services/sale_service.rs

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::{PaginatedResponse, PaginationParams},
    },
    db::{CustomerRepository, FinancialRepository, ProductRepository, SaleRepository},
    models::{
        dashboard::SalesChartEntry,
        sale::{
            CreateSalePayload, PaymentType, Sale, SaleFilters, SaleStatus, SaleTotalsRow,
            UpdateSalePayload,
        },
    },
};

#[derive(Clone)]
pub struct SaleService {
    pool: PgPool,
    repo: SaleRepository,
    product_repo: ProductRepository,
    customer_repo: CustomerRepository,
    financial_repo: FinancialRepository,
}

impl SaleService {
    pub fn new(
        pool: PgPool,
        repo: SaleRepository,
        product_repo: ProductRepository,
        customer_repo: CustomerRepository,
        financial_repo: FinancialRepository,
    ) -> Self {
        Self {
            pool,
            repo,
            product_repo,
            customer_repo,
            financial_repo,
        }
    }

    // Cria a venda inteira numa transação só: cabeçalho, itens, baixa de
    // estoque e, se for a prazo, a conta a receber. Qualquer falha desfaz tudo.
    pub async fn create(&self, payload: CreateSalePayload) -> Result<Sale, AppError> {
        let mut tx = self.pool.begin().await?;

        let sale_date = payload.sale_date.unwrap_or_else(Utc::now);

        // 1. Carrega os produtos (com lock) e recalcula os totais no servidor.
        // O total mandado pelo front é ignorado.
        let mut lines = Vec::with_capacity(payload.items.len());
        for item in &payload.items {
            let product = self
                .product_repo
                .find_for_update(&mut *tx, item.product_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Produto {} não encontrado.", item.product_id))
                })?;

            if !product.active {
                return Err(AppError::BusinessRule(format!(
                    "O produto \"{}\" está inativo.",
                    product.name
                )));
            }

            if product.moves_stock && product.stock_quantity < item.quantity {
                return Err(AppError::BusinessRule(format!(
                    "Estoque insuficiente para o produto \"{}\".",
                    product.name
                )));
            }

            lines.push(SaleLine {
                quantity: item.quantity,
                unit_price: item.unit_price,
                cost_price: product.cost_price,
                product,
            });
        }

        let totals = compute_totals(&lines, payload.discount);

        // 2. Insere o cabeçalho
        let mut sale = self
            .repo
            .insert_sale(
                &mut *tx,
                payload.customer_id,
                totals.total_amount,
                payload.discount,
                totals.profit_estimate,
                payload.payment_type,
                sale_date,
                payload.due_date,
                payload.notes.as_deref(),
            )
            .await?;

        // 3. Insere os itens e baixa o estoque do que movimenta estoque
        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            let total_price = line.total_price();
            let item = self
                .repo
                .insert_item(
                    &mut *tx,
                    sale.id,
                    line.product.id,
                    line.quantity,
                    line.unit_price,
                    total_price,
                    line.cost_price,
                )
                .await?;
            items.push(item);

            if line.product.moves_stock {
                self.repo
                    .adjust_stock(&mut *tx, line.product.id, -line.quantity)
                    .await?;
            }
        }

        // 4. Venda a prazo com vencimento gera conta a receber
        if payload.payment_type == PaymentType::Credit {
            if let Some(due_date) = payload.due_date {
                let customer_name = match payload.customer_id {
                    Some(id) => self
                        .customer_repo
                        .find_by_id(id)
                        .await?
                        .map(|c| c.name)
                        .unwrap_or_else(|| "Cliente não identificado".to_string()),
                    None => "Cliente não identificado".to_string(),
                };

                self.financial_repo
                    .create_receivable(
                        &mut *tx,
                        payload.customer_id,
                        Some(sale.id),
                        &format!("Venda a prazo - {}", customer_name),
                        totals.total_amount,
                        due_date,
                        None,
                    )
                    .await?;
            }
        }

        tx.commit().await?;

        sale.items = Some(items);
        if let Some(customer_id) = sale.customer_id {
            sale.customer = self.customer_repo.find_by_id(customer_id).await?;
        }
        Ok(sale)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateSalePayload) -> Result<Sale, AppError> {
        self.repo
            .update_header(
                id,
                payload.customer_id,
                payload.payment_type,
                payload.status,
                payload.due_date,
                payload.notes.as_deref(),
            )
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repo.delete(id).await
    }

    // Estorno: devolve o estoque, remove as contas a receber ainda pendentes
    // e marca a venda como estornada — tudo na mesma transação.
    pub async fn refund(&self, id: Uuid) -> Result<Sale, AppError> {
        let sale = self
            .repo
            .find_header(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Venda não encontrada.".into()))?;

        if sale.status == SaleStatus::Refunded {
            return Err(AppError::BusinessRule("Esta venda já foi estornada.".into()));
        }
        if sale.status == SaleStatus::Cancelled {
            return Err(AppError::BusinessRule(
                "Não é possível estornar uma venda cancelada.".into(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let items = self.repo.items_for_sale(&mut *tx, id).await?;
        for item in &items {
            // adjust_stock só mexe em produtos que movimentam estoque
            self.repo
                .adjust_stock(&mut *tx, item.product_id, item.quantity)
                .await?;
        }

        self.financial_repo
            .delete_pending_receivables_for_sale(&mut *tx, id)
            .await?;

        let refunded = self.repo.set_status(&mut *tx, id, SaleStatus::Refunded).await?;

        tx.commit().await?;
        Ok(refunded)
    }

    // Venda completa: cabeçalho + cliente + itens (cada item com seu produto).
    pub async fn find_by_id(&self, id: Uuid) -> Result<Sale, AppError> {
        let mut sale = self
            .repo
            .find_header(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Venda não encontrada.".into()))?;

        let mut items = self.repo.items_for_sale(&self.pool, id).await?;

        let mut product_ids: Vec<Uuid> = items.iter().map(|i| i.product_id).collect();
        product_ids.sort();
        product_ids.dedup();

        if !product_ids.is_empty() {
            let products = self.product_repo.find_by_ids(&product_ids).await?;
            for item in &mut items {
                item.product = products.iter().find(|p| p.id == item.product_id).cloned();
            }
        }

        sale.items = Some(items);
        if let Some(customer_id) = sale.customer_id {
            sale.customer = self.customer_repo.find_by_id(customer_id).await?;
        }
        Ok(sale)
    }

    // Listagem paginada com o cliente embutido, juntado pela customer_id.
    pub async fn find_all(
        &self,
        filters: SaleFilters,
        pagination: PaginationParams,
    ) -> Result<PaginatedResponse<Sale>, AppError> {
        let pagination = pagination.normalized();
        let (mut sales, total) = self.repo.list(&filters, pagination).await?;

        let mut customer_ids: Vec<Uuid> = sales.iter().filter_map(|s| s.customer_id).collect();
        customer_ids.sort();
        customer_ids.dedup();

        if !customer_ids.is_empty() {
            let customers = self.customer_repo.find_by_ids(&customer_ids).await?;
            for sale in &mut sales {
                sale.customer = sale
                    .customer_id
                    .and_then(|id| customers.iter().find(|c| c.id == id).cloned());
            }
        }

        Ok(PaginatedResponse::new(sales, total, pagination))
    }

    pub async fn stats(
        &self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<crate::models::sale::SalesStats, AppError> {
        let (total_sales, total_profit, count) = self.repo.stats(start_date, end_date).await?;
        Ok(crate::models::sale::SalesStats {
            total_sales,
            total_profit,
            count,
        })
    }

    // Vendas concluídas dos últimos N meses, agrupadas por mês.
    pub async fn chart_data(&self, months: u32) -> Result<Vec<SalesChartEntry>, AppError> {
        let start = Utc::now()
            .checked_sub_months(chrono::Months::new(months))
            .unwrap_or_else(Utc::now);
        let rows = self.repo.completed_totals_since(start).await?;
        Ok(group_by_month(&rows))
    }
}

// ---
// Cálculo dos totais (puro, testável)
// ---

struct SaleLine {
    quantity: i32,
    unit_price: Decimal,
    cost_price: Decimal,
    product: crate::models::product::Product,
}

impl SaleLine {
    fn total_price(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

struct SaleTotals {
    total_amount: Decimal,
    profit_estimate: Decimal,
}

fn compute_totals(lines: &[SaleLine], discount: Decimal) -> SaleTotals {
    let subtotal: Decimal = lines.iter().map(SaleLine::total_price).sum();
    let profit: Decimal = lines
        .iter()
        .map(|l| (l.unit_price - l.cost_price) * Decimal::from(l.quantity))
        .sum();

    SaleTotals {
        total_amount: subtotal - discount,
        profit_estimate: profit - discount,
    }
}

// Reduz as linhas (já ordenadas por data) em entradas mensais "YYYY-MM",
// preservando a ordem de aparição dos meses.
pub(crate) fn group_by_month(rows: &[SaleTotalsRow]) -> Vec<SalesChartEntry> {
    let mut entries: Vec<SalesChartEntry> = Vec::new();

    for row in rows {
        let period = format!("{:04}-{:02}", row.sale_date.year(), row.sale_date.month());

        match entries.iter_mut().find(|e| e.period == period) {
            Some(entry) => {
                entry.sales += row.total_amount;
                entry.profit += row.profit_estimate;
                entry.count += 1;
            }
            None => entries.push(SalesChartEntry {
                period,
                sales: row.total_amount,
                profit: row.profit_estimate,
                count: 1,
            }),
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product(cost_cents: i64, moves_stock: bool) -> crate::models::product::Product {
        crate::models::product::Product {
            id: Uuid::new_v4(),
            name: "Produto".into(),
            description: None,
            cost_price: Decimal::new(cost_cents, 2),
            sale_price: Decimal::ZERO,
            stock_quantity: 100,
            moves_stock,
            active: true,
            category_id: None,
            category: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn line(quantity: i32, unit_cents: i64, cost_cents: i64) -> SaleLine {
        SaleLine {
            quantity,
            unit_price: Decimal::new(unit_cents, 2),
            cost_price: Decimal::new(cost_cents, 2),
            product: product(cost_cents, true),
        }
    }

    #[test]
    fn total_do_item_e_quantidade_vezes_preco() {
        assert_eq!(line(2, 4500, 2500).total_price(), Decimal::new(9000, 2));
        assert_eq!(line(1, 7000, 4000).total_price(), Decimal::new(7000, 2));
    }

    #[test]
    fn totais_da_venda_somam_itens_e_subtraem_desconto() {
        // 2 x 45,00 + 1 x 70,00 = 160,00; desconto de 10,00 => 150,00
        let lines = vec![line(2, 4500, 2500), line(1, 7000, 4000)];
        let totals = compute_totals(&lines, Decimal::new(1000, 2));

        assert_eq!(totals.total_amount, Decimal::new(15000, 2));
        // lucro: 2 x 20,00 + 1 x 30,00 = 70,00; menos desconto => 60,00
        assert_eq!(totals.profit_estimate, Decimal::new(6000, 2));
    }

    #[test]
    fn venda_sem_desconto() {
        let lines = vec![line(3, 1000, 600)];
        let totals = compute_totals(&lines, Decimal::ZERO);
        assert_eq!(totals.total_amount, Decimal::new(3000, 2));
        assert_eq!(totals.profit_estimate, Decimal::new(1200, 2));
    }

    fn row(year: i32, month: u32, day: u32, amount_cents: i64, profit_cents: i64) -> SaleTotalsRow {
        SaleTotalsRow {
            sale_date: Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap(),
            total_amount: Decimal::new(amount_cents, 2),
            profit_estimate: Decimal::new(profit_cents, 2),
        }
    }

    #[test]
    fn agrupamento_mensal_soma_e_conta() {
        let rows = vec![
            row(2026, 6, 1, 10000, 4000),
            row(2026, 6, 15, 5000, 2000),
            row(2026, 7, 2, 20000, 8000),
        ];
        let entries = group_by_month(&rows);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].period, "2026-06");
        assert_eq!(entries[0].sales, Decimal::new(15000, 2));
        assert_eq!(entries[0].profit, Decimal::new(6000, 2));
        assert_eq!(entries[0].count, 2);

        assert_eq!(entries[1].period, "2026-07");
        assert_eq!(entries[1].count, 1);
    }

    #[test]
    fn agrupamento_preserva_ordem_cronologica() {
        let rows = vec![
            row(2025, 12, 20, 1000, 100),
            row(2026, 1, 5, 2000, 200),
            row(2026, 1, 9, 3000, 300),
        ];
        let entries = group_by_month(&rows);
        let periods: Vec<_> = entries.iter().map(|e| e.period.as_str()).collect();
        assert_eq!(periods, vec!["2025-12", "2026-01"]);
    }

    #[test]
    fn agrupamento_de_lista_vazia() {
        assert!(group_by_month(&[]).is_empty());
    }
}
