use axum::{extract::State, Json};
use serde_json::{json, Value};
use crate::state::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let accounts = state.ledger.read().await.accounts().len();
    let exchange_rates = if state.exchange_rates.is_loading().await {
        "loading"
    } else {
        "ready"
    };

    Json(json!({
        "status": "healthy",
        "accounts": accounts,
        "exchange_rates": exchange_rates
    }))
}
