//! Cartstore
//!
//! Session shopping cart for a storefront: add, remove and re-quantify
//! products against a remote inventory, with every change mirrored to a
//! persistent key-value store.

pub mod cart;
pub mod config;
pub mod inventory;
pub mod notifications;
pub mod prelude;
pub mod products;
pub mod storage;
