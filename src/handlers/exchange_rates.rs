use crate::models::ExchangeRatesResponse;
use crate::state::AppState;
use axum::{extract::State, Json};

pub async fn get_exchange_rates(State(state): State<AppState>) -> Json<ExchangeRatesResponse> {
    Json(state.exchange_rates.snapshot().await)
}
