use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    Checking,
    Savings,
    Business,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: u64,
    pub account_number: String,
    pub name: String,
    pub balance: Decimal,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub currency: String,
    pub status: AccountStatus,
    pub owner_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Credit,
    Debit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

/// A ledger entry. The sign of `amount` matches `direction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub direction: Direction,
    pub currency: String,
    pub status: TransactionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_account_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateTable {
    pub base_currency: String,
    pub rates: BTreeMap<String, Decimal>,
    pub last_updated: DateTime<Utc>,
}

/// Raw transfer form input. Every field arrives as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    #[serde(default)]
    pub source_account_number: String,
    #[serde(default)]
    pub destination_account_number: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
pub struct GetAccountsQuery {
    pub currency: Option<String>,
    pub status: Option<AccountStatus>,
}

#[derive(Deserialize)]
pub struct GetTransactionsQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub total_balance: Decimal,
    pub totals_by_currency: BTreeMap<String, Decimal>,
    pub account_count: usize,
    pub active_account_count: usize,
    pub transactions_this_month: usize,
    pub recent_transactions: Vec<Transaction>,
}

#[derive(Serialize)]
pub struct ExchangeRatesResponse {
    pub loading: bool,
    pub table: Option<ExchangeRateTable>,
}
