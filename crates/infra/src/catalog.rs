//! Catalog and tenant-config source adapters
//!
//! HTTP implementations of the core's read ports. Transport problems and
//! malformed product payloads surface as `DataFetch` (the preview is
//! blocked with "unable to load products"); a tenant config whose *shape*
//! is wrong degrades to an empty config instead, because a blank-but-valid
//! document beats a hard failure for a config typo.

use async_trait::async_trait;
use reqwest::Method;
use tilequote_core::ports::{ProductSource, TenantConfigSource};
use tilequote_domain::{ProductRecord, QuoteError, Result, TenantFieldConfig};
use tracing::{debug, warn};

use crate::http::HttpClient;

/// Product catalog fetched from the platform API.
pub struct HttpProductSource {
    client: HttpClient,
    base_url: String,
}

impl HttpProductSource {
    pub fn new(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self { client, base_url: trim_base(base_url.into()) }
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn fetch_products(&self, tenant_id: &str) -> Result<Vec<ProductRecord>> {
        let url = format!("{}/tenants/{}/products", self.base_url, tenant_id);
        let response = self.client.send(self.client.request(Method::GET, &url)).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::DataFetch(format!(
                "catalog responded with {status} for tenant {tenant_id}"
            )));
        }

        let products: Vec<ProductRecord> = response
            .json()
            .await
            .map_err(|err| QuoteError::DataFetch(format!("malformed product list: {err}")))?;
        debug!(tenant_id, count = products.len(), "fetched product catalog");
        Ok(products)
    }
}

/// Tenant field-label and grade-flag config fetched from the platform API.
pub struct HttpTenantConfigSource {
    client: HttpClient,
    base_url: String,
}

impl HttpTenantConfigSource {
    pub fn new(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self { client, base_url: trim_base(base_url.into()) }
    }
}

#[async_trait]
impl TenantConfigSource for HttpTenantConfigSource {
    async fn fetch_config(&self, tenant_id: &str) -> Result<TenantFieldConfig> {
        let url = format!("{}/tenants/{}/quotation-config", self.base_url, tenant_id);
        let response = self.client.send(self.client.request(Method::GET, &url)).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::DataFetch(format!(
                "config source responded with {status} for tenant {tenant_id}"
            )));
        }

        // Shape problems inside the blob are recovered by from_value; only
        // a body that is not JSON at all counts as a fetch failure.
        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|err| QuoteError::DataFetch(format!("config body is not JSON: {err}")))?;

        let config = TenantFieldConfig::from_value(value);
        if config.field_labels.is_empty() && config.grade_flags.is_empty() {
            warn!(tenant_id, "tenant config resolved to empty; document will have no columns");
        }
        Ok(config)
    }
}

fn trim_base(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}
