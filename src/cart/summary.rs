//! Cart summary

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{cart::models::Cart, products::ProductId};

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummaryError {
    /// A price does not fit in minor currency units.
    #[error("price of product {0} is out of range")]
    PriceOutOfRange(ProductId),
}

/// Priced view of one cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSummary {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub title: String,

    /// Quantity in the cart
    pub amount: u32,

    /// Price of a single unit
    pub unit_price: Money<'static, Currency>,

    /// Unit price multiplied by the amount
    pub subtotal: Money<'static, Currency>,
}

/// Priced view of a whole cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary {
    lines: Vec<LineSummary>,
    total: Money<'static, Currency>,
}

impl CartSummary {
    /// Price every line of `cart` in `currency`.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::PriceOutOfRange`] when a line total overflows.
    pub fn from_cart(cart: &Cart, currency: &'static Currency) -> Result<Self, SummaryError> {
        let mut lines = Vec::with_capacity(cart.len());
        let mut total_minor: i64 = 0;

        for item in cart {
            let id = item.id();
            let out_of_range = || SummaryError::PriceOutOfRange(id);

            let unit_minor = to_minor(item.product.price, currency).ok_or_else(out_of_range)?;

            let subtotal_minor = unit_minor
                .checked_mul(i64::from(item.amount))
                .ok_or_else(out_of_range)?;

            total_minor = total_minor
                .checked_add(subtotal_minor)
                .ok_or_else(out_of_range)?;

            lines.push(LineSummary {
                id,
                title: item.product.title.clone(),
                amount: item.amount,
                unit_price: Money::from_minor(unit_minor, currency),
                subtotal: Money::from_minor(subtotal_minor, currency),
            });
        }

        Ok(Self {
            lines,
            total: Money::from_minor(total_minor, currency),
        })
    }

    /// Priced lines, in cart order.
    #[must_use]
    pub fn lines(&self) -> &[LineSummary] {
        &self.lines
    }

    /// Sum of all line subtotals.
    #[must_use]
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Render the summary as a table.
    #[must_use]
    pub fn render(&self) -> String {
        let mut builder = Builder::default();

        builder.push_record(["ID", "Product", "Amount", "Price", "Subtotal"]);

        for line in &self.lines {
            builder.push_record([
                line.id.to_string(),
                line.title.clone(),
                line.amount.to_string(),
                line.unit_price.to_string(),
                line.subtotal.to_string(),
            ]);
        }

        builder.push_record([
            String::new(),
            "Total".to_string(),
            String::new(),
            String::new(),
            self.total.to_string(),
        ]);

        let mut table = builder.build();

        table
            .with(Style::rounded())
            .modify(Columns::new(2..), Alignment::right());

        table.to_string()
    }
}

/// Convert a major-unit price to minor units, rounding half away from zero.
fn to_minor(price: Decimal, currency: &Currency) -> Option<i64> {
    let scale = Decimal::from(10_u64.checked_pow(currency.exponent)?);

    price
        .checked_mul(scale)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::{cart::models::LineItem, products::Product};

    use super::*;

    fn line(id: u64, price: Decimal, amount: u32) -> LineItem {
        LineItem {
            product: Product {
                id: ProductId::new(id),
                title: format!("Sneaker {id}"),
                price,
                image: String::new(),
            },
            amount,
        }
    }

    #[test]
    fn empty_cart_totals_zero() -> TestResult {
        let summary = CartSummary::from_cart(&Cart::new(), iso::BRL)?;

        assert!(summary.lines().is_empty());
        assert_eq!(summary.total(), Money::from_minor(0, iso::BRL));

        Ok(())
    }

    #[test]
    fn subtotals_multiply_price_by_amount() -> TestResult {
        let cart: Cart = [
            line(1, Decimal::new(17990, 2), 2),
            line(2, Decimal::new(13990, 2), 1),
        ]
        .into_iter()
        .collect();

        let summary = CartSummary::from_cart(&cart, iso::BRL)?;

        let subtotals: Vec<_> = summary.lines().iter().map(|line| line.subtotal).collect();

        assert_eq!(
            subtotals,
            [
                Money::from_minor(35980, iso::BRL),
                Money::from_minor(13990, iso::BRL)
            ]
        );
        assert_eq!(summary.total(), Money::from_minor(49970, iso::BRL));

        Ok(())
    }

    #[test]
    fn fractional_cents_are_rounded() {
        assert_eq!(to_minor(Decimal::new(10005, 3), iso::BRL), Some(1001));
    }

    #[test]
    fn overflowing_line_is_reported() {
        let cart: Cart = [line(9, Decimal::from(i64::MAX / 100), u32::MAX)]
            .into_iter()
            .collect();

        assert_eq!(
            CartSummary::from_cart(&cart, iso::BRL),
            Err(SummaryError::PriceOutOfRange(ProductId::new(9)))
        );
    }

    #[test]
    fn render_lists_every_line_and_total() -> TestResult {
        let cart: Cart = [line(1, Decimal::new(5000, 2), 3)].into_iter().collect();

        let rendered = CartSummary::from_cart(&cart, iso::BRL)?.render();

        assert!(rendered.contains("Sneaker 1"), "missing title in {rendered}");
        assert!(rendered.contains("Total"), "missing total row in {rendered}");

        Ok(())
    }
}
