// src/db/product_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::PaginationParams,
    },
    models::product::{Product, ProductFilters, TopProductEntry},
};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

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
        // Produtos criados são ativos por padrão
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (name, description, cost_price, sale_price, stock_quantity, moves_stock, category_id, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(cost_price)
        .bind(sale_price)
        .bind(stock_quantity)
        .bind(moves_stock)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

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
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, description = $3, cost_price = $4, sale_price = $5,
                stock_quantity = $6, moves_stock = $7, category_id = $8,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(cost_price)
        .bind(sale_price)
        .bind(stock_quantity)
        .bind(moves_stock)
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Produto não encontrado.".into()))
    }

    // Exclusão lógica: setar active como false
    pub async fn soft_delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE products SET active = FALSE, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Produto não encontrado.".into()));
        }
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    // Trava a linha do produto dentro da transação de venda.
    pub async fn find_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product =
            sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(product)
    }

    // Paginação em duas idas ao banco (COUNT e depois a página),
    // ambas com o mesmo conjunto de filtros.
    pub async fn list(
        &self,
        filters: &ProductFilters,
        low_stock_threshold: i32,
        pagination: PaginationParams,
    ) -> Result<(Vec<Product>, i64), AppError> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_filters(&mut count_query, filters, low_stock_threshold);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut page_query = QueryBuilder::<Postgres>::new("SELECT * FROM products");
        push_filters(&mut page_query, filters, low_stock_threshold);
        page_query.push(" ORDER BY created_at DESC LIMIT ");
        page_query.push_bind(pagination.limit());
        page_query.push(" OFFSET ");
        page_query.push_bind(pagination.offset());

        let products = page_query
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        Ok((products, total))
    }

    pub async fn find_low_stock(
        &self,
        threshold: i32,
        limit: i64,
    ) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE active = TRUE AND moves_stock = TRUE AND stock_quantity < $1
            ORDER BY stock_quantity ASC
            LIMIT $2
            "#,
        )
        .bind(threshold)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    // Ajuste absoluto de estoque (contagem de inventário).
    pub async fn update_stock(&self, id: Uuid, quantity: i32) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET stock_quantity = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Produto não encontrado.".into()))
    }

    // Curva ABC: produtos mais vendidos em quantidade/receita.
    pub async fn top_selling(&self, limit: i64) -> Result<Vec<TopProductEntry>, AppError> {
        let entries = sqlx::query_as::<_, TopProductEntry>(
            r#"
            SELECT
                p.id AS product_id,
                p.name AS product_name,
                SUM(si.quantity) AS total_quantity,
                SUM(si.total_price) AS total_revenue
            FROM sale_items si
            JOIN products p ON p.id = si.product_id
            GROUP BY p.id, p.name
            ORDER BY total_quantity DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    // Valor imobilizado em estoque (quantidade x custo).
    pub async fn stock_value(&self) -> Result<Decimal, AppError> {
        let value = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(stock_quantity * cost_price), 0)
            FROM products
            WHERE active = TRUE
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(value)
    }
}

fn push_filters(
    query: &mut QueryBuilder<'_, Postgres>,
    filters: &ProductFilters,
    low_stock_threshold: i32,
) {
    // Apenas produtos ativos
    query.push(" WHERE active = TRUE");

    if let Some(search) = &filters.search {
        query.push(" AND name ILIKE ");
        query.push_bind(format!("%{}%", search));
    }

    if let Some(moves_stock) = filters.moves_stock {
        query.push(" AND moves_stock = ");
        query.push_bind(moves_stock);
    }

    if filters.low_stock {
        query.push(" AND stock_quantity < ");
        query.push_bind(low_stock_threshold);
    }
}
