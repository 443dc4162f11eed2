use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::error::StoreError;
use crate::services::exchange_rates::ExchangeRateLoader;
use crate::services::transfers::Ledger;

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<RwLock<Ledger>>,
    pub exchange_rates: ExchangeRateLoader,
}

impl AppState {
    pub fn new(ledger: Ledger, exchange_rates: ExchangeRateLoader) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
            exchange_rates,
        }
    }

    /// Seeded ledger and an unmounted rate loader.
    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        Ok(Self::new(
            Ledger::seeded(config.base_currency.clone())?,
            ExchangeRateLoader::new(
                config.base_currency.clone(),
                Duration::from_millis(config.exchange_rate_delay_ms),
            ),
        ))
    }
}
