//! Inventory

pub mod errors;
pub mod http;
pub mod service;

pub use errors::InventoryError;
pub use http::HttpInventoryService;
pub use service::*;
