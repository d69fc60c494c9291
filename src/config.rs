//! CLI configuration module

use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::products::ProductId;

/// Configuration errors detected after parsing.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The currency code is not an ISO 4217 code.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Cartstore CLI configuration
#[derive(Debug, Parser)]
#[command(name = "cartstore", about = "Storefront cart", long_about = None)]
pub struct Config {
    /// Inventory API base URL
    #[arg(long, env = "INVENTORY_API_URL", default_value = "http://localhost:3333", global = true)]
    pub api_url: String,

    /// File holding the persisted cart
    #[arg(long, env = "CART_STORAGE_PATH", default_value = "cart.json", global = true)]
    pub storage_path: PathBuf,

    /// Inventory request timeout in seconds
    #[arg(long, env = "INVENTORY_TIMEOUT_SECS", default_value = "10", global = true)]
    pub timeout_secs: u64,

    /// ISO 4217 currency used for prices
    #[arg(long, env = "CART_CURRENCY", default_value = "BRL", global = true)]
    pub currency: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show the cart with subtotals
    Show,

    /// List the catalog with the amount of each product in the cart
    Catalog,

    /// Add one unit of a product
    Add {
        /// Product identifier
        product: u64,
    },

    /// Remove a product from the cart
    Remove {
        /// Product identifier
        product: u64,
    },

    /// Set the amount of a product in the cart
    Update {
        /// Product identifier
        product: u64,

        /// New amount
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

impl Command {
    /// Product targeted by the command, if any.
    #[must_use]
    pub fn product(&self) -> Option<ProductId> {
        match self {
            Self::Show | Self::Catalog => None,
            Self::Add { product } | Self::Remove { product } | Self::Update { product, .. } => {
                Some(ProductId::new(*product))
            }
        }
    }
}

impl Config {
    /// Load configuration from `.env`, the environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Inventory request timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Currency used for prices
    ///
    /// # Errors
    ///
    /// Returns an error if the configured code is unknown
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        iso::find(&self.currency.to_uppercase())
            .ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_update_with_negative_amount() -> TestResult {
        let config = Config::try_parse_from(["cartstore", "update", "3", "-1"])?;

        assert_eq!(
            config.command,
            Command::Update {
                product: 3,
                amount: -1
            }
        );
        assert_eq!(config.command.product(), Some(ProductId::new(3)));

        Ok(())
    }

    #[test]
    fn global_flags_follow_subcommand() -> TestResult {
        let config = Config::try_parse_from([
            "cartstore",
            "add",
            "1",
            "--api-url",
            "http://inventory:3333",
            "--timeout-secs",
            "2",
        ])?;

        assert_eq!(config.api_url, "http://inventory:3333");
        assert_eq!(config.timeout(), Duration::from_secs(2));

        Ok(())
    }

    #[test]
    fn currency_codes_resolve_case_insensitively() -> TestResult {
        let config = Config::try_parse_from(["cartstore", "--currency", "brl", "show"])?;

        assert_eq!(config.currency()?, iso::BRL);

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() -> TestResult {
        let config = Config::try_parse_from(["cartstore", "--currency", "XYZ1", "show"])?;

        assert!(
            matches!(config.currency(), Err(ConfigError::UnknownCurrency(_))),
            "expected UnknownCurrency"
        );

        Ok(())
    }
}
