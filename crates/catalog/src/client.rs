//! HTTP implementation of the core `CatalogClient` seam.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use trolley_core::config::CatalogConfig;
use trolley_core::{CatalogClient, CatalogError, CatalogProduct, ProductId, Stock};

/// Read-only client for the storefront catalog service. Stock and product
/// live on separate endpoints (`stock/{id}`, `products/{id}`); the cart
/// reads them independently.
#[derive(Clone, Debug)]
pub struct HttpCatalogClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| CatalogError::Transport(error.to_string()))?;

        Ok(Self { base_url: config.base_url.trim_end_matches('/').to_owned(), client })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        id: ProductId,
    ) -> Result<T, CatalogError> {
        let url = format!("{}/{path}", self.base_url);
        debug!(event_name = "catalog.fetch", url = %url, product_id = id.0, "catalog read");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|error| CatalogError::Transport(error.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound { id }),
            status if !status.is_success() => {
                Err(CatalogError::Transport(format!("catalog returned {status} for {url}")))
            }
            _ => response.json().await.map_err(|error| CatalogError::Transport(error.to_string())),
        }
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.get_json(&format!("stock/{id}"), id).await
    }

    async fn fetch_product(&self, id: ProductId) -> Result<CatalogProduct, CatalogError> {
        self.get_json(&format!("products/{id}"), id).await
    }
}
