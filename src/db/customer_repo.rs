// src/db/customer_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::PaginationParams,
    },
    models::customer::{Customer, CustomerReceivablesEntry, TopCustomerEntry},
};

#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Customer, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, email, phone, address)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(address)
        .fetch_one(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Customer, AppError> {
        sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET name = $2, email = $3, phone = $4, address = $5, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(address)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Cliente não encontrado.".into()))
    }

    // Clientes são removidos fisicamente (não há exclusão lógica aqui).
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cliente não encontrado.".into()));
        }
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(customer)
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Customer>, AppError> {
        let customers =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?;
        Ok(customers)
    }

    // Busca livre: nome OU e-mail OU telefone.
    pub async fn list(
        &self,
        search: Option<&str>,
        pagination: PaginationParams,
    ) -> Result<(Vec<Customer>, i64), AppError> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM customers");
        push_search(&mut count_query, search);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut page_query = QueryBuilder::<Postgres>::new("SELECT * FROM customers");
        push_search(&mut page_query, search);
        page_query.push(" ORDER BY name ASC LIMIT ");
        page_query.push_bind(pagination.limit());
        page_query.push(" OFFSET ");
        page_query.push_bind(pagination.offset());

        let customers = page_query
            .build_query_as::<Customer>()
            .fetch_all(&self.pool)
            .await?;

        Ok((customers, total))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers WHERE name ILIKE $1 ORDER BY name ASC",
        )
        .bind(format!("%{}%", name))
        .fetch_all(&self.pool)
        .await?;
        Ok(customers)
    }

    // Melhores clientes por faturamento.
    pub async fn top_customers(&self, limit: i64) -> Result<Vec<TopCustomerEntry>, AppError> {
        let entries = sqlx::query_as::<_, TopCustomerEntry>(
            r#"
            SELECT
                c.id AS customer_id,
                c.name AS customer_name,
                SUM(s.total_amount) AS total_amount,
                COUNT(*) AS sales_count
            FROM sales s
            JOIN customers c ON c.id = s.customer_id
            GROUP BY c.id, c.name
            ORDER BY total_amount DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    // Clientes com contas a receber pendentes (cobrança).
    pub async fn with_pending_receivables(
        &self,
    ) -> Result<Vec<CustomerReceivablesEntry>, AppError> {
        let entries = sqlx::query_as::<_, CustomerReceivablesEntry>(
            r#"
            SELECT
                c.id AS customer_id,
                c.name AS customer_name,
                SUM(r.amount) AS total_amount,
                COUNT(*) AS receivables_count
            FROM receivables r
            JOIN customers c ON c.id = r.customer_id
            WHERE r.status = 'PENDING'
            GROUP BY c.id, c.name
            ORDER BY total_amount DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}

fn push_search(query: &mut QueryBuilder<'_, Postgres>, search: Option<&str>) {
    if let Some(search) = search {
        let pattern = format!("%{}%", search);
        query.push(" WHERE name ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR email ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR phone ILIKE ");
        query.push_bind(pattern);
    }
}
