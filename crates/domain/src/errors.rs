//! Error types used throughout the quotation pipeline

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for TileQuote
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum QuoteError {
    /// Tenant configuration malformed beyond safe defaulting. Recovered
    /// locally by falling back to an empty config; never a hard failure
    /// for the end user.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Product or config source unreachable or returned malformed data.
    /// Composition is aborted before any document bytes are produced.
    #[error("Unable to load products: {0}")]
    DataFetch(String),

    /// Internal invariant violation inside the document composer. Should
    /// not occur in correct operation; the caller gets a generic failure
    /// rather than a partially wrong document.
    #[error("Composition error: {0}")]
    Composition(String),

    /// Delivery failed. The nested error says which stage failed so the
    /// caller can retry just that stage.
    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),
}

/// Delivery-stage errors, kept separate so callers can distinguish a failed
/// upload from a failed notification and retry only the notify step.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "stage", content = "detail")]
pub enum DeliveryError {
    /// Uploading the document to the object store failed; nothing was
    /// stored and the whole delivery must be retried.
    #[error("upload failed: {reason}")]
    Upload { reason: String },

    /// The document was uploaded but the messaging gateway call failed.
    /// `document_url` is the already-stored document, valid for a retry
    /// that skips the upload.
    #[error("notify failed for stored document {document_url}: {reason}")]
    Notify { document_url: String, reason: String },

    /// No recipient phone number was supplied; checked before any network
    /// call is made.
    #[error("recipient phone number is missing")]
    MissingRecipient,
}

impl DeliveryError {
    /// URL of the stored document, when the upload stage already succeeded.
    pub fn stored_url(&self) -> Option<&str> {
        match self {
            Self::Notify { document_url, .. } => Some(document_url),
            _ => None,
        }
    }
}

/// Result type alias for TileQuote operations
pub type Result<T> = std::result::Result<T, QuoteError>;
