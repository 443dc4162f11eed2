pub mod config;
pub mod error;
pub mod handlers;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, TransferError};
pub use routes::create_router;
pub use services::transfers::{Ledger, TransferForm};
pub use state::AppState;
