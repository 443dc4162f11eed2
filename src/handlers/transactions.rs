use crate::models::{GetTransactionsQuery, Transaction};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};

pub async fn get_transactions(
    State(state): State<AppState>,
    Query(params): Query<GetTransactionsQuery>,
) -> Json<Vec<Transaction>> {
    let ledger = state.ledger.read().await;
    Json(ledger.transactions().recent(params.limit))
}
