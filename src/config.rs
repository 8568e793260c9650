// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        CategoryRepository, CustomerRepository, DashboardRepository, FinancialRepository,
        PaymentMethodRepository, ProductRepository, SaleRepository, UserRepository,
    },
    services::{
        auth::AuthService, category_service::CategoryService, customer_service::CustomerService,
        dashboard_service::DashboardService, financial_service::FinancialService,
        payment_method_service::PaymentMethodService, product_service::ProductService,
        sale_service::SaleService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub category_service: CategoryService,
    pub product_service: ProductService,
    pub customer_service: CustomerService,
    pub sale_service: SaleService,
    pub payment_method_service: PaymentMethodService,
    pub financial_service: FinancialService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    // Carrega as configurações, conecta no banco e monta o gráfico de serviços.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let category_repo = CategoryRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let customer_repo = CustomerRepository::new(db_pool.clone());
        let sale_repo = SaleRepository::new(db_pool.clone());
        let payment_method_repo = PaymentMethodRepository::new(db_pool.clone());
        let financial_repo = FinancialRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret);
        let category_service = CategoryService::new(category_repo.clone());
        let product_service = ProductService::new(product_repo.clone(), category_repo);
        let customer_service = CustomerService::new(customer_repo.clone());
        let sale_service = SaleService::new(
            db_pool.clone(),
            sale_repo.clone(),
            product_repo.clone(),
            customer_repo.clone(),
            financial_repo.clone(),
        );
        let payment_method_service = PaymentMethodService::new(payment_method_repo);
        let financial_service =
            FinancialService::new(db_pool.clone(), financial_repo.clone(), customer_repo);
        let dashboard_service =
            DashboardService::new(dashboard_repo, sale_repo, product_repo, financial_repo);

        Ok(Self {
            db_pool,
            auth_service,
            category_service,
            product_service,
            customer_service,
            sale_service,
            payment_method_service,
            financial_service,
            dashboard_service,
        })
    }
}
