pub mod accounts;
pub mod dashboard;
pub mod exchange_rates;
pub mod health;
pub mod transactions;
