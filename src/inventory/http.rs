//! HTTP inventory client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::{
    inventory::{errors::InventoryError, service::InventoryService},
    products::{Product, ProductId, Stock},
};

/// Inventory backed by a JSON REST API exposing `products` and `stock`
/// collections.
#[derive(Debug, Clone)]
pub struct HttpInventoryService {
    base_url: String,
    http: Client,
}

impl HttpInventoryService {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InventoryError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Fetch a JSON document, mapping a 404 to `None`.
    async fn fetch(&self, path: &str) -> Result<Option<Value>, InventoryError> {
        let url = self.url(path);

        debug!("GET {url}");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            return Err(InventoryError::UnexpectedStatus { status, url });
        }

        let body = response.bytes().await?;

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(InventoryError::Malformed)
    }
}

#[async_trait]
impl InventoryService for HttpInventoryService {
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, InventoryError> {
        match self.fetch(&format!("products/{id}")).await? {
            Some(body) => decode_product(body),
            None => Ok(None),
        }
    }

    async fn get_stock(&self, id: ProductId) -> Result<Stock, InventoryError> {
        let body = self
            .fetch(&format!("stock/{id}"))
            .await?
            .ok_or(InventoryError::StockNotFound(id))?;

        serde_json::from_value(body).map_err(InventoryError::Malformed)
    }

    async fn list_products(&self) -> Result<Vec<Product>, InventoryError> {
        let url = self.url("products");

        let body = self
            .fetch("products")
            .await?
            .ok_or(InventoryError::UnexpectedStatus {
                status: StatusCode::NOT_FOUND,
                url,
            })?;

        serde_json::from_value(body).map_err(InventoryError::Malformed)
    }
}

/// Decode a product body. Some inventory backends answer unknown ids with an
/// empty object rather than a 404.
fn decode_product(body: Value) -> Result<Option<Product>, InventoryError> {
    if body.is_null() || body.as_object().is_some_and(serde_json::Map::is_empty) {
        return Ok(None);
    }

    serde_json::from_value(body)
        .map(Some)
        .map_err(InventoryError::Malformed)
}
