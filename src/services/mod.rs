pub mod accounts;
pub mod exchange_rates;
pub mod transactions;
pub mod transfers;
