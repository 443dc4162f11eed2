use std::collections::VecDeque;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{Direction, Transaction, TransactionStatus};

/// Append-at-front log of transactions. Entries are never edited once recorded.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    entries: VecDeque<Transaction>,
}

impl TransactionLog {
    /// `entries` must already be ordered most-recent-first.
    pub fn new(entries: Vec<Transaction>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_transactions())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&Transaction> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }

    pub fn recent(&self, limit: Option<usize>) -> Vec<Transaction> {
        let limit = limit.unwrap_or(self.entries.len());
        self.entries.iter().take(limit).cloned().collect()
    }

    pub fn next_id(&self) -> u64 {
        self.entries.iter().map(|tx| tx.id).max().unwrap_or(0) + 1
    }

    pub fn prepend(&mut self, transaction: Transaction) {
        self.entries.push_front(transaction);
    }

    pub fn count_in_month(&self, year: i32, month: u32) -> usize {
        self.entries
            .iter()
            .filter(|tx| tx.date.year() == year && tx.date.month() == month)
            .count()
    }
}

fn seed_transactions() -> Vec<Transaction> {
    let entry = |id: u64, day: u32, description: &str, cents: i64| {
        let direction = if cents >= 0 {
            Direction::Credit
        } else {
            Direction::Debit
        };
        Transaction {
            id,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap_or(NaiveDate::MIN),
            description: description.to_string(),
            amount: Decimal::new(cents, 2),
            direction,
            currency: "EUR".to_string(),
            status: TransactionStatus::Completed,
            source_account_number: None,
            destination_account_number: None,
        }
    };

    vec![
        entry(1, 15, "Salaire", 350_000),
        entry(2, 14, "Loyer", -85_000),
        entry(3, 13, "Courses", -12_050),
        entry(4, 12, "Virement reçu", 20_000),
        entry(5, 11, "Restaurant", -6_530),
    ]
}
