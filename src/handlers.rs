pub mod auth;
pub mod categories;
pub mod customers;
pub mod dashboard;
pub mod financial;
pub mod payment_methods;
pub mod products;
pub mod sales;
