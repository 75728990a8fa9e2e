//! Quotation service - pipeline orchestration
//!
//! Ties the ports and the pure pipeline stages together: fetch the tenant
//! snapshot, resolve columns, group products, compose the document. The
//! two fetches are the only awaits; composition itself is synchronous and
//! CPU-bound.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use tilequote_domain::{Result, TenantFieldConfig};
use tracing::debug;

use crate::columns::resolve_columns;
use crate::compose::{compose, ComposeRequest};
use crate::grouping::group_products;
use crate::ports::{ProductSource, TenantConfigSource};
use crate::session::QuotationSession;

/// Orchestrates one quotation compose cycle against the external sources.
pub struct QuotationService {
    products: Arc<dyn ProductSource>,
    config: Arc<dyn TenantConfigSource>,
    company_name: Option<String>,
}

impl QuotationService {
    /// Create a new quotation service.
    pub fn new(products: Arc<dyn ProductSource>, config: Arc<dyn TenantConfigSource>) -> Self {
        Self { products, config, company_name: None }
    }

    /// Company heading printed at the top of every document.
    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = Some(name.into());
        self
    }

    /// Fetch the tenant snapshot and compose the document.
    ///
    /// A fetch failure aborts before any bytes are produced
    /// (`QuoteError::DataFetch`); the config source degrades malformed
    /// shapes to an empty config on its own, so a blank-but-valid document
    /// still renders in that case. `generated_at` is embedded in the
    /// header; pass a fixed instant for reproducible output.
    pub async fn build_document(
        &self,
        tenant_id: &str,
        session: &QuotationSession,
        generated_at: DateTime<FixedOffset>,
    ) -> Result<Vec<u8>> {
        let config: TenantFieldConfig = self.config.fetch_config(tenant_id).await?;
        let products = self.products.fetch_products(tenant_id).await?;
        debug!(tenant_id, products = products.len(), "fetched tenant snapshot");

        let columns = resolve_columns(&config, session.template);
        let groups = group_products(&products);

        compose(&ComposeRequest {
            form: &session.form,
            columns: &columns,
            groups: &groups,
            overlay: &session.overlay,
            identity: session.identity.as_ref(),
            company_name: self.company_name.as_deref(),
            generated_at,
        })
    }
}

/// Message sent alongside the stored document URL. Composed here so every
/// delivery path uses the same wording.
pub fn notification_message(customer_name: &str) -> String {
    let name = customer_name.trim();
    if name.is_empty() {
        "Greetings! Please find your quotation attached.".to_string()
    } else {
        format!("Dear {name}, please find your quotation attached.")
    }
}
