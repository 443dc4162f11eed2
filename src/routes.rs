use axum::{
    middleware::{self},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use crate::handlers::{accounts, dashboard, exchange_rates, health, transactions};
use crate::state::AppState;
use crate::middlewares::request_logger::request_logger;

pub fn create_router() -> Router<AppState> {

    // Accounts routes
    let accounts_routes = Router::new()
        .route("/", get(accounts::get_accounts))
        .route("/{account_number}", get(accounts::get_account));

    Router::new()
        .route("/", get(health::health_check))
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/transactions", get(transactions::get_transactions))
        .route("/transfers", post(accounts::transfer))
        .route("/exchange-rates", get(exchange_rates::get_exchange_rates))
        .nest("/accounts", accounts_routes)
        .layer(middleware::from_fn(request_logger))
        .layer(CorsLayer::permissive())
}
