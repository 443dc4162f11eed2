use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::error::{StoreError, TransferError};
use crate::models::{Direction, Transaction, TransactionStatus, TransferRequest};
use crate::services::accounts::AccountStore;
use crate::services::transactions::TransactionLog;

/// Checks the form fields and returns the parsed amount.
pub fn validate_transfer_input(payload: &TransferRequest) -> Result<Decimal, TransferError> {
    if payload.source_account_number.trim().is_empty() {
        return Err(TransferError::MissingSource);
    }
    if payload.destination_account_number.trim().is_empty() {
        return Err(TransferError::MissingDestination);
    }

    let raw_amount = payload.amount.trim();
    if raw_amount.is_empty() {
        return Err(TransferError::MissingAmount);
    }

    let amount: Decimal = raw_amount
        .parse()
        .map_err(|_| TransferError::InvalidAmount(raw_amount.to_string()))?;

    if amount <= Decimal::ZERO {
        return Err(TransferError::NonPositiveAmount);
    }

    Ok(amount)
}

/// Account store and transaction log, mutated together by transfers.
#[derive(Debug, Clone)]
pub struct Ledger {
    accounts: AccountStore,
    transactions: TransactionLog,
    base_currency: String,
}

impl Ledger {
    pub fn new(
        accounts: AccountStore,
        transactions: TransactionLog,
        base_currency: impl Into<String>,
    ) -> Self {
        Self {
            accounts,
            transactions,
            base_currency: base_currency.into(),
        }
    }

    pub fn seeded(base_currency: impl Into<String>) -> Result<Self, StoreError> {
        Ok(Self::new(
            AccountStore::seeded()?,
            TransactionLog::seeded(),
            base_currency,
        ))
    }

    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    pub fn transactions(&self) -> &TransactionLog {
        &self.transactions
    }

    pub fn transfer(&mut self, payload: &TransferRequest) -> Result<Transaction, TransferError> {
        self.transfer_on(payload, Utc::now().date_naive())
    }

    /// Applies a transfer dated `date`.
    ///
    /// The debit is recorded and applied even when the destination is not a
    /// known account, in which case the credit side is dropped and the total
    /// balance shrinks. Overdrafts and self-transfers are accepted. Both new
    /// balances are computed before anything is written, so a rejected
    /// transfer leaves the ledger as it was.
    pub fn transfer_on(
        &mut self,
        payload: &TransferRequest,
        date: NaiveDate,
    ) -> Result<Transaction, TransferError> {
        let amount = validate_transfer_input(payload)?;
        let source = payload.source_account_number.trim();
        let destination = payload.destination_account_number.trim();

        let balances = self.compute_balance_transfer(source, destination, amount)?;

        let transaction =
            self.create_transaction_record(source, destination, amount, &payload.description, date);
        self.transactions.prepend(transaction.clone());
        self.execute_balance_transfer(source, destination, balances);

        tracing::info!(
            transaction_id = transaction.id,
            source,
            destination,
            amount = %amount,
            "Transfer applied"
        );

        Ok(transaction)
    }

    fn create_transaction_record(
        &self,
        source: &str,
        destination: &str,
        amount: Decimal,
        description: &str,
        date: NaiveDate,
    ) -> Transaction {
        let currency = self
            .accounts
            .get(source)
            .map(|account| account.currency.clone())
            .unwrap_or_else(|| self.base_currency.clone());

        let description = match description.trim() {
            "" => format!("Virement vers {}", destination),
            text => text.to_string(),
        };

        Transaction {
            id: self.transactions.next_id(),
            date,
            description,
            amount: -amount,
            direction: Direction::Debit,
            currency,
            status: TransactionStatus::Completed,
            source_account_number: Some(source.to_string()),
            destination_account_number: Some(destination.to_string()),
        }
    }

    /// New (source, destination) balances; `None` for an unknown account.
    fn compute_balance_transfer(
        &self,
        source: &str,
        destination: &str,
        amount: Decimal,
    ) -> Result<(Option<Decimal>, Option<Decimal>), TransferError> {
        let source_balance = match self.accounts.get(source) {
            Some(account) => Some(
                account
                    .balance
                    .checked_sub(amount)
                    .ok_or(TransferError::AmountOutOfRange)?,
            ),
            None => None,
        };

        let destination_start = if source == destination {
            source_balance
        } else {
            self.accounts.get(destination).map(|account| account.balance)
        };
        let destination_balance = match destination_start {
            Some(balance) => Some(
                balance
                    .checked_add(amount)
                    .ok_or(TransferError::AmountOutOfRange)?,
            ),
            None => None,
        };

        Ok((source_balance, destination_balance))
    }

    fn execute_balance_transfer(
        &mut self,
        source: &str,
        destination: &str,
        (source_balance, destination_balance): (Option<Decimal>, Option<Decimal>),
    ) {
        match source_balance {
            Some(balance) => {
                self.accounts.set_balance(source, balance);
            }
            None => tracing::warn!(
                source,
                "Transfer source is not a known account, no balance debited"
            ),
        }
        match destination_balance {
            Some(balance) => {
                self.accounts.set_balance(destination, balance);
            }
            None => tracing::warn!(
                destination,
                "Transfer destination is not a known account, no balance credited"
            ),
        }
    }
}

/// The transient transfer form. Cleared after a successful submission, kept
/// as typed after a rejected one.
#[derive(Debug, Clone, Default)]
pub struct TransferForm {
    request: TransferRequest,
}

impl TransferForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_request(request: TransferRequest) -> Self {
        Self { request }
    }

    pub fn request(&self) -> &TransferRequest {
        &self.request
    }

    pub fn is_empty(&self) -> bool {
        self.request == TransferRequest::default()
    }

    pub fn set_source(&mut self, account_number: impl Into<String>) {
        self.request.source_account_number = account_number.into();
    }

    pub fn set_destination(&mut self, account_number: impl Into<String>) {
        self.request.destination_account_number = account_number.into();
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.request.amount = amount.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.request.description = description.into();
    }

    pub fn submit(&mut self, ledger: &mut Ledger) -> Result<Transaction, TransferError> {
        let transaction = ledger.transfer(&self.request)?;
        self.request = TransferRequest::default();
        Ok(transaction)
    }
}
