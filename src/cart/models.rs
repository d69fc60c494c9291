//! Cart Models

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductId};

/// Storage key under which the cart snapshot is kept.
pub const CART_STORAGE_KEY: &str = "@storefront:cart";

/// One product and the quantity requested.
///
/// The product fields are stored inline, so a snapshot line reads
/// `{ "id", "title", "price", "image", "amount" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product details as fetched when the line was last added to
    #[serde(flatten)]
    pub product: Product,

    /// Quantity in the cart
    pub amount: u32,
}

impl LineItem {
    /// Product identifier of this line.
    #[must_use]
    pub fn id(&self) -> ProductId {
        self.product.id
    }
}

/// Ordered list of line items, at most one per product.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a cart from its stored snapshot. Lines with a zero amount are
    /// dropped and a repeated product keeps its last line.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot is not a JSON list of line items.
    pub fn from_snapshot(snapshot: &[u8]) -> Result<Self, serde_json::Error> {
        let items: Vec<LineItem> = serde_json::from_slice(snapshot)?;

        Ok(items.into_iter().filter(|item| item.amount > 0).collect())
    }

    /// Encode the cart as a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization fails.
    pub fn to_snapshot(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Iterate over the line items.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Line item for `id`, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Whether the cart has a line for `id`.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_amount(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Quantity in the cart keyed by product.
    #[must_use]
    pub fn amounts(&self) -> FxHashMap<ProductId, u32> {
        self.items
            .iter()
            .map(|item| (item.id(), item.amount))
            .collect()
    }

    /// Copy of the cart with `product` at `amount`, replacing the existing line
    /// in place or appending a new one.
    pub(crate) fn with_line(&self, product: Product, amount: u32) -> Self {
        let mut items = self.items.clone();
        let line = LineItem { product, amount };

        match items.iter_mut().find(|item| item.id() == line.id()) {
            Some(existing) => *existing = line,
            None => items.push(line),
        }

        Self { items }
    }

    /// Copy of the cart without the line for `id`, or `None` when absent.
    pub(crate) fn without(&self, id: ProductId) -> Option<Self> {
        if !self.contains(id) {
            return None;
        }

        let items = self
            .items
            .iter()
            .filter(|item| item.id() != id)
            .cloned()
            .collect();

        Some(Self { items })
    }

    /// Copy of the cart with the amount of `id` replaced, or `None` when absent.
    pub(crate) fn with_amount(&self, id: ProductId, amount: u32) -> Option<Self> {
        let line = self.get(id)?;

        Some(self.with_line(line.product.clone(), amount))
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<LineItem> for Cart {
    /// Collect line items into a cart. A later line for the same product
    /// replaces the earlier one in place.
    fn from_iter<I: IntoIterator<Item = LineItem>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |cart, item| {
            cart.with_line(item.product, item.amount)
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn product(id: u64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Decimal::new(9990, 2),
            image: format!("https://img/{id}.jpg"),
        }
    }

    #[test]
    fn with_line_appends_new_products_in_order() {
        let cart = Cart::new().with_line(product(2), 1).with_line(product(1), 1);

        let ids: Vec<_> = cart.iter().map(LineItem::id).collect();

        assert_eq!(ids, [ProductId::new(2), ProductId::new(1)]);
    }

    #[test]
    fn with_line_replaces_existing_line_in_place() {
        let cart = Cart::new()
            .with_line(product(1), 1)
            .with_line(product(2), 1)
            .with_line(product(1), 2);

        let lines: Vec<_> = cart.iter().map(|item| (item.id(), item.amount)).collect();

        assert_eq!(lines, [(ProductId::new(1), 2), (ProductId::new(2), 1)]);
    }

    #[test]
    fn without_missing_product_returns_none() {
        let cart = Cart::new().with_line(product(1), 1);

        assert!(cart.without(ProductId::new(2)).is_none());
    }

    #[test]
    fn with_amount_keeps_product_fields() -> TestResult {
        let cart = Cart::new().with_line(product(1), 1);

        let updated = cart
            .with_amount(ProductId::new(1), 4)
            .ok_or("line should exist")?;

        let line = updated.get(ProductId::new(1)).ok_or("line should exist")?;

        assert_eq!(line.amount, 4);
        assert_eq!(line.product, product(1));

        Ok(())
    }

    #[test]
    fn snapshot_is_a_flat_json_list() -> TestResult {
        let cart = Cart::new().with_line(product(7), 3);

        let value: serde_json::Value = serde_json::from_slice(&cart.to_snapshot()?)?;

        assert_eq!(
            value,
            serde_json::json!([{
                "id": 7,
                "title": "Product 7",
                "price": 99.9,
                "image": "https://img/7.jpg",
                "amount": 3
            }])
        );

        Ok(())
    }

    #[test]
    fn snapshot_decoding_drops_empty_lines() -> TestResult {
        let cart = Cart::from_snapshot(
            br#"[
                {"id":1,"title":"A","price":10.5,"image":"a.jpg","amount":0},
                {"id":2,"title":"B","price":20.5,"image":"b.jpg","amount":2}
            ]"#,
        )?;

        assert_eq!(cart.len(), 1);
        assert!(cart.contains(ProductId::new(2)));

        Ok(())
    }

    #[test]
    fn amounts_and_totals() {
        let cart = Cart::new().with_line(product(1), 2).with_line(product(2), 3);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_amount(), 5);
        assert_eq!(cart.amounts().get(&ProductId::new(2)), Some(&3));
    }

    #[test]
    fn collecting_deduplicates_products() {
        let cart: Cart = [
            LineItem {
                product: product(1),
                amount: 1,
            },
            LineItem {
                product: product(1),
                amount: 5,
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(ProductId::new(1)).map(|item| item.amount), Some(5));
    }
}
