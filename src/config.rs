//! Server configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to deserialize environment variables into a type-safe struct.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Server configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string, or `memory`
///   to run against the in-memory store
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 8080
/// - `STARTING_BALANCE` (optional): balance of newly registered accounts,
///   defaults to 1000.00
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_starting_balance")]
    pub starting_balance: Decimal,
}

fn default_port() -> u16 {
    8080
}

fn default_starting_balance() -> Decimal {
    Decimal::new(100000, 2)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        envy::from_env::<Config>()
    }

    /// Whether the server should use the in-memory store instead of Postgres.
    pub fn uses_memory_store(&self) -> bool {
        self.database_url.eq_ignore_ascii_case("memory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let vars = vec![("DATABASE_URL".to_string(), "memory".to_string())];

        let config = envy::from_iter::<_, Config>(vars).unwrap();

        assert_eq!(config.server_port, 8080);
        assert_eq!(config.starting_balance, Decimal::new(100000, 2));
        assert!(config.uses_memory_store());
    }

    #[test]
    fn starting_balance_is_read_as_decimal() {
        let vars = vec![
            ("DATABASE_URL".to_string(), "postgres://localhost/tenmo".to_string()),
            ("STARTING_BALANCE".to_string(), "250.50".to_string()),
            ("SERVER_PORT".to_string(), "9000".to_string()),
        ];

        let config = envy::from_iter::<_, Config>(vars).unwrap();

        assert_eq!(config.starting_balance, Decimal::new(25050, 2));
        assert_eq!(config.server_port, 9000);
        assert!(!config.uses_memory_store());
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let vars: Vec<(String, String)> = Vec::new();

        assert!(envy::from_iter::<_, Config>(vars).is_err());
    }
}
