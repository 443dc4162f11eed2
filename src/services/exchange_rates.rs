use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::models::{ExchangeRateTable, ExchangeRatesResponse};

const REFERENCE_CURRENCY: &str = "EUR";

#[derive(Debug, Default)]
struct LoaderState {
    mounted: bool,
    loading: bool,
    table: Option<ExchangeRateTable>,
}

/// One-shot loader for the mocked rate table.
#[derive(Clone)]
pub struct ExchangeRateLoader {
    inner: Arc<RwLock<LoaderState>>,
    base_currency: String,
    delay: Duration,
}

impl ExchangeRateLoader {
    pub fn new(base_currency: impl Into<String>, delay: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(LoaderState::default())),
            base_currency: base_currency.into(),
            delay,
        }
    }

    /// Starts the load. Only the first call on a loader does anything.
    pub async fn mount(&self) -> Option<JoinHandle<()>> {
        {
            let mut state = self.inner.write().await;
            if state.mounted {
                tracing::debug!("Exchange rate loader already mounted");
                return None;
            }
            state.mounted = true;
            state.loading = true;
        }

        let inner = Arc::clone(&self.inner);
        let base_currency = self.base_currency.clone();
        let delay = self.delay;
        let delay_ms = delay.as_millis() as u64;

        Some(tokio::spawn(async move {
            tracing::info!(base = %base_currency, delay_ms, "Loading exchange rates");
            let table = fetch_exchange_rates(&base_currency, delay).await;
            let count = table.rates.len();

            let mut state = inner.write().await;
            state.table = Some(table);
            state.loading = false;
            tracing::info!(rates = count, "Exchange rates loaded");
        }))
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.loading
    }

    pub async fn table(&self) -> Option<ExchangeRateTable> {
        self.inner.read().await.table.clone()
    }

    pub async fn snapshot(&self) -> ExchangeRatesResponse {
        let state = self.inner.read().await;
        ExchangeRatesResponse {
            loading: state.loading,
            table: state.table.clone(),
        }
    }
}

/// Simulated upstream call: waits `delay`, then returns the static table.
pub async fn fetch_exchange_rates(base_currency: &str, delay: Duration) -> ExchangeRateTable {
    tokio::time::sleep(delay).await;

    let reference = reference_rates();
    let rates = if base_currency == REFERENCE_CURRENCY {
        reference
    } else if let Some(base_rate) = reference.get(base_currency).copied() {
        rebase(&reference, base_currency, base_rate)
    } else {
        tracing::warn!(
            base = base_currency,
            "No rates for base currency, falling back to {}",
            REFERENCE_CURRENCY
        );
        return ExchangeRateTable {
            base_currency: REFERENCE_CURRENCY.to_string(),
            rates: reference,
            last_updated: Utc::now(),
        };
    };

    ExchangeRateTable {
        base_currency: base_currency.to_string(),
        rates,
        last_updated: Utc::now(),
    }
}

fn reference_rates() -> BTreeMap<String, Decimal> {
    [
        ("USD", Decimal::new(10850, 4)),
        ("GBP", Decimal::new(8570, 4)),
        ("CHF", Decimal::new(9420, 4)),
        ("JPY", Decimal::new(16235, 2)),
        ("CAD", Decimal::new(14680, 4)),
        ("MAD", Decimal::new(108900, 4)),
    ]
    .into_iter()
    .map(|(code, rate)| (code.to_string(), rate))
    .collect()
}

fn rebase(
    reference: &BTreeMap<String, Decimal>,
    base_currency: &str,
    base_rate: Decimal,
) -> BTreeMap<String, Decimal> {
    let mut rates: BTreeMap<String, Decimal> = reference
        .iter()
        .filter(|(code, _)| code.as_str() != base_currency)
        .map(|(code, rate)| (code.clone(), (*rate / base_rate).round_dp(4)))
        .collect();
    rates.insert(
        REFERENCE_CURRENCY.to_string(),
        (Decimal::ONE / base_rate).round_dp(4),
    );
    rates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn loading_flag_flips_once_around_the_delay() {
        let loader = ExchangeRateLoader::new("EUR", Duration::from_millis(1000));
        assert!(!loader.is_loading().await);

        let handle = loader.mount().await.unwrap();
        assert!(loader.is_loading().await);
        assert!(loader.table().await.is_none());

        tokio::time::advance(Duration::from_millis(500)).await;
        tokio::task::yield_now().await;
        assert!(loader.is_loading().await);

        handle.await.unwrap();
        assert!(!loader.is_loading().await);

        let table = loader.table().await.unwrap();
        assert_eq!(table.base_currency, "EUR");
        assert_eq!(table.rates.get("USD"), Some(&Decimal::new(10850, 4)));
        assert_eq!(table.rates.len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn second_mount_is_ignored() {
        let loader = ExchangeRateLoader::new("EUR", Duration::from_millis(10));
        let handle = loader.mount().await.unwrap();
        assert!(loader.mount().await.is_none());
        handle.await.unwrap();
        assert!(loader.mount().await.is_none());
        assert!(!loader.is_loading().await);
    }

    #[tokio::test(start_paused = true)]
    async fn rebases_onto_other_currency() {
        let table = fetch_exchange_rates("USD", Duration::ZERO).await;
        assert_eq!(table.base_currency, "USD");
        assert!(!table.rates.contains_key("USD"));
        assert_eq!(table.rates.get("EUR"), Some(&Decimal::new(9217, 4)));
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_base_falls_back_to_reference() {
        let table = fetch_exchange_rates("XYZ", Duration::ZERO).await;
        assert_eq!(table.base_currency, "EUR");
        assert_eq!(table.rates.len(), 6);
    }
}
