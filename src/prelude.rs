//! Cartstore prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CART_STORAGE_KEY, Cart, CartError, CartStore, CartSummary, LineItem, Outcome},
    inventory::{HttpInventoryService, InventoryError, InventoryService},
    notifications::{Notice, Notifier, TracingNotifier},
    products::{Product, ProductId, Stock},
    storage::{FileStore, InMemoryStore, PersistentStore, StorageError},
};
