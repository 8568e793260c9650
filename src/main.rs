// src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new().route(
        "/me",
        get(handlers::auth::get_me).put(handlers::auth::update_me),
    );

    let category_routes = Router::new()
        .route(
            "/",
            get(handlers::categories::list_categories).post(handlers::categories::create_category),
        )
        .route("/active", get(handlers::categories::list_active_categories))
        .route(
            "/{id}",
            put(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        );

    let product_routes = Router::new()
        .route(
            "/",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route("/low-stock", get(handlers::products::list_low_stock))
        .route("/top-selling", get(handlers::products::top_selling))
        .route("/stock-value", get(handlers::products::stock_value))
        .route(
            "/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route("/{id}/stock", put(handlers::products::update_stock));

    let customer_routes = Router::new()
        .route(
            "/",
            get(handlers::customers::list_customers).post(handlers::customers::create_customer),
        )
        .route("/search", get(handlers::customers::search_customers))
        .route("/top", get(handlers::customers::top_customers))
        .route(
            "/with-receivables",
            get(handlers::customers::customers_with_receivables),
        )
        .route(
            "/{id}",
            get(handlers::customers::get_customer)
                .put(handlers::customers::update_customer)
                .delete(handlers::customers::delete_customer),
        );

    let sale_routes = Router::new()
        .route(
            "/",
            get(handlers::sales::list_sales).post(handlers::sales::create_sale),
        )
        .route("/stats", get(handlers::sales::sales_stats))
        .route("/chart", get(handlers::sales::sales_chart))
        .route(
            "/{id}",
            get(handlers::sales::get_sale)
                .put(handlers::sales::update_sale)
                .delete(handlers::sales::delete_sale),
        )
        .route("/{id}/refund", post(handlers::sales::refund_sale));

    let payment_method_routes = Router::new()
        .route(
            "/",
            get(handlers::payment_methods::list_payment_methods)
                .post(handlers::payment_methods::create_payment_method),
        )
        .route(
            "/active",
            get(handlers::payment_methods::list_active_payment_methods),
        )
        .route(
            "/{id}",
            get(handlers::payment_methods::get_payment_method)
                .put(handlers::payment_methods::update_payment_method)
                .delete(handlers::payment_methods::delete_payment_method),
        )
        .route(
            "/{id}/active",
            put(handlers::payment_methods::toggle_payment_method),
        );

    let financial_routes = Router::new()
        .route(
            "/payables",
            get(handlers::financial::list_payables).post(handlers::financial::create_payable),
        )
        .route(
            "/payables/{id}",
            get(handlers::financial::get_payable)
                .put(handlers::financial::update_payable)
                .delete(handlers::financial::delete_payable),
        )
        .route("/payables/{id}/pay", post(handlers::financial::pay_payable))
        .route(
            "/receivables",
            get(handlers::financial::list_receivables)
                .post(handlers::financial::create_receivable),
        )
        .route(
            "/receivables/{id}",
            get(handlers::financial::get_receivable)
                .put(handlers::financial::update_receivable)
                .delete(handlers::financial::delete_receivable),
        )
        .route(
            "/receivables/{id}/pay",
            post(handlers::financial::pay_receivable),
        );

    let dashboard_routes = Router::new()
        .route("/stats", get(handlers::dashboard::get_stats))
        .route("/sales-chart", get(handlers::dashboard::sales_chart))
        .route("/top-products", get(handlers::dashboard::top_products))
        .route(
            "/financial-summary",
            get(handlers::dashboard::financial_summary),
        )
        .route(
            "/upcoming-due-dates",
            get(handlers::dashboard::upcoming_due_dates),
        )
        .route("/low-stock", get(handlers::dashboard::low_stock_alerts))
        .route(
            "/recent-activity",
            get(handlers::dashboard::recent_activity),
        );

    // Tudo que mexe em dados do negócio passa pelo guardião de autenticação
    let protected_routes = Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/categories", category_routes)
        .nest("/api/products", product_routes)
        .nest("/api/customers", customer_routes)
        .nest("/api/sales", sale_routes)
        .nest("/api/payment-methods", payment_method_routes)
        .nest("/api/financial", financial_routes)
        .nest("/api/dashboard", dashboard_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(protected_routes)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Inicia o servidor
    let addr =
        std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
