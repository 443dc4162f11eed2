use std::env;
use std::net::{IpAddr, SocketAddr};

use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub server_port: u16,
    pub base_currency: String,
    pub exchange_rate_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();

        Ok(Config {
            bind_addr: env::var("BIND_ADDR")
                .unwrap_or_else(|_| "127.0.0.1".to_string())
                .parse()?,
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            base_currency: env::var("BASE_CURRENCY")
                .map(|code| code.trim().to_uppercase())
                .unwrap_or_else(|_| "EUR".to_string()),
            exchange_rate_delay_ms: env::var("EXCHANGE_RATE_DELAY_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()?,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.server_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: IpAddr::from([127, 0, 0, 1]),
            server_port: 3000,
            base_currency: "EUR".to_string(),
            exchange_rate_delay_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_socket_addr() {
        let config = Config::default();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.base_currency, "EUR");
    }
}
