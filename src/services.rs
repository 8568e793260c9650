pub mod auth;
pub mod category_service;
pub mod customer_service;
pub mod dashboard_service;
pub mod financial_service;
pub mod payment_method_service;
pub mod product_service;
pub mod sale_service;
