use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;

use crate::error::StoreError;
use crate::models::{Account, AccountStatus, AccountType};

/// In-memory account list keyed by account number.
#[derive(Debug, Clone, Default)]
pub struct AccountStore {
    accounts: Vec<Account>,
}

impl AccountStore {
    pub fn new(accounts: Vec<Account>) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        for account in &accounts {
            if !seen.insert(account.account_number.as_str()) {
                return Err(StoreError::DuplicateAccountNumber(
                    account.account_number.clone(),
                ));
            }
        }
        Ok(Self { accounts })
    }

    pub fn seeded() -> Result<Self, StoreError> {
        Self::new(seed_accounts())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn get(&self, account_number: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|account| account.account_number == account_number)
    }

    pub fn filtered(&self, currency: Option<&str>, status: Option<AccountStatus>) -> Vec<Account> {
        self.accounts
            .iter()
            .filter(|account| currency.map_or(true, |c| account.currency == c))
            .filter(|account| status.map_or(true, |s| account.status == s))
            .cloned()
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.accounts
            .iter()
            .filter(|account| account.status == AccountStatus::Active)
            .count()
    }

    /// Sum of every balance regardless of currency, as the dashboard header shows it.
    pub fn total_balance(&self) -> Result<Decimal, StoreError> {
        self.accounts
            .iter()
            .try_fold(Decimal::ZERO, |total, account| total.checked_add(account.balance))
            .ok_or(StoreError::BalanceOverflow)
    }

    pub fn totals_by_currency(&self) -> Result<BTreeMap<String, Decimal>, StoreError> {
        let mut totals = BTreeMap::new();
        for account in &self.accounts {
            let total = totals
                .entry(account.currency.clone())
                .or_insert(Decimal::ZERO);
            *total = total
                .checked_add(account.balance)
                .ok_or(StoreError::BalanceOverflow)?;
        }
        Ok(totals)
    }

    /// Overwrites the balance of the matching account. Returns false if the number is unknown.
    pub fn set_balance(&mut self, account_number: &str, balance: Decimal) -> bool {
        match self
            .accounts
            .iter_mut()
            .find(|account| account.account_number == account_number)
        {
            Some(account) => {
                account.balance = balance;
                true
            }
            None => false,
        }
    }
}

fn seed_accounts() -> Vec<Account> {
    let account = |id: u64, name: &str, cents: i64, account_type: AccountType| Account {
        id,
        account_number: format!("FR763000100001000000000{}", id),
        name: name.to_string(),
        balance: Decimal::new(cents, 2),
        account_type,
        currency: "EUR".to_string(),
        status: AccountStatus::Active,
        owner_id: "client-001".to_string(),
    };

    vec![
        account(1, "Compte Courant", 1_250_050, AccountType::Checking),
        account(2, "Compte Épargne", 4_500_000, AccountType::Savings),
        account(3, "Compte Entreprise", 7_832_075, AccountType::Business),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn seeded_store_totals() {
        let store = AccountStore::seeded().unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.active_count(), 3);
        assert_eq!(store.total_balance(), Ok(dec("135821.25")));
        assert_eq!(
            store.totals_by_currency().unwrap().get("EUR"),
            Some(&dec("135821.25"))
        );
    }

    #[test]
    fn rejects_duplicate_account_numbers() {
        let mut accounts = seed_accounts();
        accounts[1].account_number = accounts[0].account_number.clone();
        let err = AccountStore::new(accounts).unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateAccountNumber("FR7630001000010000000001".to_string())
        );
    }

    #[test]
    fn set_balance_allows_negative_and_ignores_unknown() {
        let mut store = AccountStore::seeded().unwrap();
        assert!(store.set_balance("FR7630001000010000000001", dec("-7499.50")));
        assert_eq!(
            store.get("FR7630001000010000000001").unwrap().balance,
            dec("-7499.50")
        );
        assert!(!store.set_balance("DE00UNKNOWN", dec("10")));
        assert_eq!(store.total_balance(), Ok(dec("115821.25")));
    }

    #[test]
    fn totals_report_overflow_instead_of_panicking() {
        let mut accounts = seed_accounts();
        accounts[0].balance = Decimal::MAX;
        accounts[1].balance = Decimal::MAX;
        let store = AccountStore::new(accounts).unwrap();

        assert_eq!(store.total_balance(), Err(StoreError::BalanceOverflow));
        assert_eq!(store.totals_by_currency(), Err(StoreError::BalanceOverflow));
    }

    #[test]
    fn filters_by_currency_and_status() {
        let mut accounts = seed_accounts();
        accounts[2].currency = "USD".to_string();
        accounts[1].status = AccountStatus::Inactive;
        let store = AccountStore::new(accounts).unwrap();

        assert_eq!(store.filtered(Some("EUR"), None).len(), 2);
        assert_eq!(store.filtered(None, Some(AccountStatus::Inactive)).len(), 1);
        assert_eq!(store.filtered(Some("USD"), Some(AccountStatus::Active)).len(), 1);
        assert_eq!(store.active_count(), 2);
        assert_eq!(store.totals_by_currency().unwrap().len(), 2);
    }
}
