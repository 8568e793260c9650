// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::update_me,

        // --- Categorias ---
        handlers::categories::list_categories,
        handlers::categories::list_active_categories,
        handlers::categories::create_category,
        handlers::categories::update_category,
        handlers::categories::delete_category,

        // --- Produtos ---
        handlers::products::list_products,
        handlers::products::create_product,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::products::list_low_stock,
        handlers::products::update_stock,
        handlers::products::top_selling,
        handlers::products::stock_value,

        // --- Clientes ---
        handlers::customers::list_customers,
        handlers::customers::create_customer,
        handlers::customers::get_customer,
        handlers::customers::update_customer,
        handlers::customers::delete_customer,
        handlers::customers::search_customers,
        handlers::customers::top_customers,
        handlers::customers::customers_with_receivables,

        // --- Vendas ---
        handlers::sales::list_sales,
        handlers::sales::create_sale,
        handlers::sales::get_sale,
        handlers::sales::update_sale,
        handlers::sales::delete_sale,
        handlers::sales::refund_sale,
        handlers::sales::sales_stats,
        handlers::sales::sales_chart,

        // --- Formas de Pagamento ---
        handlers::payment_methods::list_payment_methods,
        handlers::payment_methods::list_active_payment_methods,
        handlers::payment_methods::get_payment_method,
        handlers::payment_methods::create_payment_method,
        handlers::payment_methods::update_payment_method,
        handlers::payment_methods::delete_payment_method,
        handlers::payment_methods::toggle_payment_method,

        // --- Financeiro ---
        handlers::financial::list_payables,
        handlers::financial::create_payable,
        handlers::financial::get_payable,
        handlers::financial::update_payable,
        handlers::financial::delete_payable,
        handlers::financial::pay_payable,
        handlers::financial::list_receivables,
        handlers::financial::create_receivable,
        handlers::financial::get_receivable,
        handlers::financial::update_receivable,
        handlers::financial::delete_receivable,
        handlers::financial::pay_receivable,

        // --- Dashboard ---
        handlers::dashboard::get_stats,
        handlers::dashboard::sales_chart,
        handlers::dashboard::top_products,
        handlers::dashboard::financial_summary,
        handlers::dashboard::upcoming_due_dates,
        handlers::dashboard::low_stock_alerts,
        handlers::dashboard::recent_activity,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::UpdateProfilePayload,
            models::auth::AuthResponse,

            // --- Categorias ---
            models::category::Category,
            handlers::categories::CategoryPayload,

            // --- Produtos ---
            models::product::Product,
            models::product::TopProductEntry,
            handlers::products::ProductPayload,
            handlers::products::UpdateStockPayload,
            handlers::products::StockValueResponse,

            // --- Clientes ---
            models::customer::Customer,
            models::customer::TopCustomerEntry,
            models::customer::CustomerReceivablesEntry,
            handlers::customers::CustomerPayload,

            // --- Vendas ---
            models::sale::PaymentType,
            models::sale::SaleStatus,
            models::sale::Sale,
            models::sale::SaleItem,
            models::sale::SalesStats,
            models::sale::SaleItemPayload,
            models::sale::CreateSalePayload,
            models::sale::UpdateSalePayload,

            // --- Formas de Pagamento ---
            models::payment_method::PaymentMethod,
            handlers::payment_methods::PaymentMethodPayload,
            handlers::payment_methods::ToggleActivePayload,

            // --- Financeiro ---
            models::financial::BillStatus,
            models::financial::RecurringInterval,
            models::financial::Payable,
            models::financial::Receivable,
            handlers::financial::PayablePayload,
            handlers::financial::ReceivablePayload,

            // --- Dashboard ---
            models::dashboard::DashboardStats,
            models::dashboard::SalesChartEntry,
            models::dashboard::FinancialSummary,
            models::dashboard::DueDateKind,
            models::dashboard::UpcomingDueDate,
            models::dashboard::LowStockAlert,
            models::dashboard::ActivityEntry,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e Perfil"),
        (name = "Categorias", description = "Categorias de Produto"),
        (name = "Produtos", description = "Catálogo e Estoque"),
        (name = "Clientes", description = "Gestão de Clientes"),
        (name = "Vendas", description = "Vendas e Estornos"),
        (name = "Formas de Pagamento", description = "Formas de Pagamento"),
        (name = "Financeiro", description = "Contas a Pagar e a Receber"),
        (name = "Dashboard", description = "Indicadores e Gráficos Gerenciais")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
