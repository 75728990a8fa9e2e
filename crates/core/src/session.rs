//! Quotation session
//!
//! One explicit object owning everything a quotation-building session
//! accumulates: the header form, the pricing overlay, the table template
//! and the optional identity for footer attribution. The caller owns the
//! session and passes it into the pipeline; nothing here is global.
//!
//! Mirroring to client-local storage is an explicit serialize/deserialize
//! pair at session boundaries, not a side effect of field edits. The
//! session is never sent to the shared relational store.

use serde::{Deserialize, Serialize};
use tilequote_domain::{Identity, QuotationForm, QuoteError, Result, TableTemplate};

use crate::overlay::PricingOverlay;

/// State owned by one quotation-editing session.
///
/// Sessions are independent: two sessions over the same tenant's catalog
/// each own their own overlay, and overlays are never shared or merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuotationSession {
    pub form: QuotationForm,
    pub overlay: PricingOverlay,
    #[serde(default)]
    pub identity: Option<Identity>,
    #[serde(default)]
    pub template: TableTemplate,
}

impl QuotationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, template: TableTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Serialize for client-local crash recovery.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| QuoteError::Config(format!("failed to serialize session: {e}")))
    }

    /// Restore a mirrored session. A corrupt mirror is a config-level
    /// problem; the caller typically falls back to a fresh session.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| QuoteError::Config(format!("failed to restore session: {e}")))
    }
}
