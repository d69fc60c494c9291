//! Cart
//!
//! [`CartStore`] owns the shopping cart for one session. Every mutation is
//! validated against the inventory, written to the [`PersistentStore`] and
//! only then applied in memory, so the stored snapshot and the in-memory cart
//! never diverge.
//!
//! [`PersistentStore`]: crate::storage::PersistentStore

pub mod errors;
pub mod models;
pub mod store;
pub mod summary;

pub use errors::CartError;
pub use models::{CART_STORAGE_KEY, Cart, LineItem};
pub use store::{CartStore, Outcome};
pub use summary::{CartSummary, LineSummary, SummaryError};
