//! Delivery service
//!
//! Final stage of the pipeline: either offer the composed document as a
//! local download, or upload it to the object store and notify the
//! customer through the messaging gateway. Upload and notify failures are
//! surfaced as distinct stages so a caller can retry the notify step
//! without regenerating or re-uploading the document.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use tilequote_core::ports::{MessagingGateway, ObjectStore};
use tilequote_core::service::notification_message;
use tilequote_domain::constants::{FILE_NAME_DATE_FORMAT, FILE_NAME_PREFIX};
use tilequote_domain::{DeliveryError, QuotationForm, QuoteError, Result};
use tracing::{info, warn};

/// A composed document paired with its deterministic download name.
#[derive(Debug, Clone)]
pub struct NamedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl NamedDocument {
    /// Write the document into `dir` and return the full path.
    pub fn save_to(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Proof of a completed upload; kept by callers across notify retries.
#[derive(Debug, Clone)]
pub struct DeliveryReceipt {
    pub url: String,
}

/// Hands composed documents to the outside world.
pub struct DeliveryService {
    store: Arc<dyn ObjectStore>,
    gateway: Arc<dyn MessagingGateway>,
}

impl DeliveryService {
    pub fn new(store: Arc<dyn ObjectStore>, gateway: Arc<dyn MessagingGateway>) -> Self {
        Self { store, gateway }
    }

    /// Local download: no network call, just the deterministic name.
    pub fn download(
        &self,
        bytes: Vec<u8>,
        customer_name: &str,
        date: DateTime<FixedOffset>,
    ) -> NamedDocument {
        NamedDocument { file_name: document_file_name(customer_name, date), bytes }
    }

    /// Upload the document, then notify the recipient with its URL.
    ///
    /// A missing recipient fails before any network call. If the upload
    /// succeeds but the notify step fails, the error carries the stored
    /// URL; retry with [`Self::notify_existing`] instead of calling this
    /// again.
    pub async fn upload_and_notify(
        &self,
        bytes: &[u8],
        form: &QuotationForm,
        date: DateTime<FixedOffset>,
    ) -> Result<DeliveryReceipt> {
        let phone = form.mobile.trim();
        if phone.is_empty() {
            return Err(QuoteError::Delivery(DeliveryError::MissingRecipient));
        }

        let file_name = document_file_name(&form.customer_name, date);
        let url = match self.store.store(bytes, &file_name).await {
            Ok(url) => url,
            Err(QuoteError::Delivery(stage)) => return Err(QuoteError::Delivery(stage)),
            Err(other) => {
                return Err(QuoteError::Delivery(DeliveryError::Upload {
                    reason: other.to_string(),
                }))
            }
        };
        info!(file_name, url = %url, "document uploaded");

        self.send_notification(phone, &form.customer_name, &url).await?;
        Ok(DeliveryReceipt { url })
    }

    /// Retry only the notify step for an already-uploaded document.
    pub async fn notify_existing(
        &self,
        document_url: &str,
        form: &QuotationForm,
    ) -> Result<()> {
        let phone = form.mobile.trim();
        if phone.is_empty() {
            return Err(QuoteError::Delivery(DeliveryError::MissingRecipient));
        }
        self.send_notification(phone, &form.customer_name, document_url).await
    }

    async fn send_notification(
        &self,
        phone: &str,
        customer_name: &str,
        url: &str,
    ) -> Result<()> {
        let message = notification_message(customer_name);
        match self.gateway.notify(phone, &message, url).await {
            Ok(true) => {
                info!(phone, url, "customer notified");
                Ok(())
            }
            Ok(false) => {
                warn!(phone, url, "gateway declined the message");
                Err(QuoteError::Delivery(DeliveryError::Notify {
                    document_url: url.to_string(),
                    reason: "gateway declined the message".into(),
                }))
            }
            Err(QuoteError::Delivery(stage)) => Err(QuoteError::Delivery(stage)),
            Err(other) => Err(QuoteError::Delivery(DeliveryError::Notify {
                document_url: url.to_string(),
                reason: other.to_string(),
            })),
        }
    }
}

/// `Quotation_<customer>_<date>.pdf`, with the customer name reduced to a
/// filesystem-safe token.
pub fn document_file_name(customer_name: &str, date: DateTime<FixedOffset>) -> String {
    let customer = sanitize_component(customer_name);
    let date = date.format(FILE_NAME_DATE_FORMAT);
    format!("{FILE_NAME_PREFIX}_{customer}_{date}.pdf")
}

fn sanitize_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut gap = false;
    for c in raw.trim().chars() {
        if c.is_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('-');
            }
            gap = false;
            out.push(c);
        } else {
            gap = true;
        }
    }
    if out.is_empty() {
        "Customer".to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-04-01T14:30:00+05:30").unwrap()
    }

    #[test]
    fn file_name_is_deterministic_and_safe() {
        assert_eq!(
            document_file_name("Acme Interiors", date()),
            "Quotation_Acme-Interiors_01-04-2025.pdf"
        );
        assert_eq!(
            document_file_name("  M/s. Sharma & Sons ", date()),
            "Quotation_M-s-Sharma-Sons_01-04-2025.pdf"
        );
        assert_eq!(document_file_name("", date()), "Quotation_Customer_01-04-2025.pdf");
    }
}
