pub mod category_repo;
pub mod customer_repo;
pub mod dashboard_repo;
pub mod financial_repo;
pub mod payment_method_repo;
pub mod product_repo;
pub mod sale_repo;
pub mod user_repo;

pub use category_repo::CategoryRepository;
pub use customer_repo::CustomerRepository;
pub use dashboard_repo::DashboardRepository;
pub use financial_repo::FinancialRepository;
pub use payment_method_repo::PaymentMethodRepository;
pub use product_repo::ProductRepository;
pub use sale_repo::SaleRepository;
pub use user_repo::UserRepository;
