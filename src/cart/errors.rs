//! Cart errors.

use thiserror::Error;

use crate::{inventory::InventoryError, products::ProductId, storage::StorageError};

/// Reasons a cart operation was refused.
#[derive(Debug, Error)]
pub enum CartError {
    /// The inventory does not know the product.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// Requested quantity exceeds the available stock.
    #[error("insufficient stock for product {product}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Product being changed
        product: ProductId,

        /// Quantity that would have been in the cart
        requested: u64,

        /// Quantity the inventory reported
        available: u32,
    },

    /// The product is not in the cart.
    #[error("product {0} is not in the cart")]
    LineItemNotFound(ProductId),

    /// Remote inventory lookup failed.
    #[error("inventory lookup failed")]
    Inventory(#[from] InventoryError),

    /// Reading or writing the cart snapshot failed.
    #[error("cart storage failed")]
    Storage(#[from] StorageError),

    /// The cart could not be encoded as a snapshot.
    #[error("cart snapshot could not be encoded")]
    Snapshot(#[source] serde_json::Error),
}

impl CartError {
    /// Whether the failure came from a collaborator rather than from the
    /// cart contents or the request.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Inventory(_) | Self::Storage(_) | Self::Snapshot(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failures_are_not_transient() {
        let id = ProductId::new(1);

        assert!(!CartError::ProductNotFound(id).is_transient());
        assert!(!CartError::LineItemNotFound(id).is_transient());
        assert!(
            !CartError::InsufficientStock {
                product: id,
                requested: 2,
                available: 1,
            }
            .is_transient()
        );
    }

    #[test]
    fn storage_failures_are_transient() {
        assert!(CartError::Storage(StorageError::Poisoned).is_transient());
    }
}
