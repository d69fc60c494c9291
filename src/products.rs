//! Products

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product identifier, unique within the inventory and within a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Wrap a raw product identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub title: String,

    /// Unit price, in major currency units
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Product image URL
    pub image: String,
}

/// Available stock for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Product identifier
    pub id: ProductId,

    /// Quantity available
    pub amount: u32,
}

impl Stock {
    /// Whether at least `requested` units are available.
    #[must_use]
    pub fn covers(&self, requested: u32) -> bool {
        self.amount >= requested
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn product_decodes_numeric_price() -> TestResult {
        let product: Product = serde_json::from_str(
            r#"{"id":1,"title":"Running Shoe","price":179.9,"image":"https://img/1.jpg"}"#,
        )?;

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Decimal::new(1799, 1));

        Ok(())
    }

    #[test]
    fn product_id_is_serialized_as_bare_number() -> TestResult {
        assert_eq!(serde_json::to_string(&ProductId::new(7))?, "7");

        Ok(())
    }

    #[test]
    fn stock_covers_requested_amount() {
        let stock = Stock {
            id: ProductId::new(1),
            amount: 2,
        };

        assert!(stock.covers(1));
        assert!(stock.covers(2));
        assert!(!stock.covers(3));
    }
}
