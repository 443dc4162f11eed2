use chrono::{Datelike, Utc};

use crate::error::AppError;
use crate::models::DashboardResponse;
use crate::state::AppState;
use axum::{extract::State, Json};

const RECENT_TRANSACTIONS: usize = 5;

/// Totals are derived from the ledger on every call.
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let today = Utc::now().date_naive();
    let ledger = state.ledger.read().await;
    let accounts = ledger.accounts();
    let transactions = ledger.transactions();

    Ok(Json(DashboardResponse {
        total_balance: accounts.total_balance()?,
        totals_by_currency: accounts.totals_by_currency()?,
        account_count: accounts.len(),
        active_account_count: accounts.active_count(),
        transactions_this_month: transactions.count_in_month(today.year(), today.month()),
        recent_transactions: transactions.recent(Some(RECENT_TRANSACTIONS)),
    }))
}
