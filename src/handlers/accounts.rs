use crate::error::AppError;
use crate::models::{Account, GetAccountsQuery, Transaction, TransferRequest};
use crate::services::transfers::TransferForm;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};

pub async fn get_accounts(
    State(state): State<AppState>,
    Query(params): Query<GetAccountsQuery>,
) -> Json<Vec<Account>> {
    let ledger = state.ledger.read().await;
    Json(
        ledger
            .accounts()
            .filtered(params.currency.as_deref(), params.status),
    )
}

pub async fn get_account(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Result<Json<Account>, AppError> {
    let ledger = state.ledger.read().await;
    ledger
        .accounts()
        .get(&account_number)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Account {}", account_number)))
}

pub async fn transfer(
    State(state): State<AppState>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<Transaction>, AppError> {
    let Json(payload) = payload?;
    let mut form = TransferForm::from_request(payload);
    let mut ledger = state.ledger.write().await;

    match form.submit(&mut ledger) {
        Ok(transaction) => Ok(Json(transaction)),
        Err(err) => {
            tracing::info!(error = %err, "Transfer rejected");
            Err(err.into())
        }
    }
}
