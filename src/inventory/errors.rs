//! Inventory service errors.

use reqwest::StatusCode;
use thiserror::Error;

use crate::products::ProductId;

/// Errors raised while querying the remote inventory.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// An HTTP transport or decoding error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The inventory answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus {
        /// Response status
        status: StatusCode,

        /// Requested URL
        url: String,
    },

    /// The response body could not be decoded.
    #[error("malformed response body")]
    Malformed(#[source] serde_json::Error),

    /// No stock record exists for the product.
    #[error("no stock record for product {0}")]
    StockNotFound(ProductId),
}
