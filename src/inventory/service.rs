//! Inventory service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    inventory::errors::InventoryError,
    products::{Product, ProductId, Stock},
};

/// Read-only view of the storefront inventory.
#[automock]
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Retrieve a single product, or `None` when the inventory does not know it.
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, InventoryError>;

    /// Retrieve the current stock level for a product.
    async fn get_stock(&self, id: ProductId) -> Result<Stock, InventoryError>;

    /// Retrieve every product in the catalog.
    async fn list_products(&self) -> Result<Vec<Product>, InventoryError>;
}
