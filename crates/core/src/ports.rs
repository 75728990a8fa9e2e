//! Port interfaces for the quotation pipeline
//!
//! The pipeline's only suspension points are behind these traits: fetching
//! the tenant's catalog and config, and handing a composed document to the
//! object store and messaging gateway. Infrastructure implements them; the
//! core never talks to the network itself.

use async_trait::async_trait;
use tilequote_domain::{ProductRecord, Result, TenantFieldConfig};

/// Read-only product catalog, fetched per tenant.
///
/// The returned sequence is treated as an immutable snapshot for the
/// duration of one compose cycle; row order is meaningful (it drives group
/// order).
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch the tenant's catalog rows.
    async fn fetch_products(&self, tenant_id: &str) -> Result<Vec<ProductRecord>>;
}

/// Tenant field-label and grade-flag configuration source.
#[async_trait]
pub trait TenantConfigSource: Send + Sync {
    /// Fetch the tenant's config. Implementations degrade malformed
    /// shapes to an empty config rather than failing; only transport
    /// problems surface as errors.
    async fn fetch_config(&self, tenant_id: &str) -> Result<TenantFieldConfig>;
}

/// External object storage for composed documents.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store the document bytes and return a retrieval URL (HTTPS).
    async fn store(&self, bytes: &[u8], file_name: &str) -> Result<String>;
}

/// External messaging gateway (WhatsApp) for delivering a stored document.
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Send `message` with the attachment URL to `phone`. Returns whether
    /// the gateway accepted the message. Implementations do not retry;
    /// the caller decides whether and when to retry.
    async fn notify(&self, phone: &str, message: &str, attachment_url: &str) -> Result<bool>;
}
