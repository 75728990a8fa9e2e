//! Quotation header and attribution types
//!
//! The customer-facing fields rendered above the product tables, plus the
//! optional identity used for the attribution footer. All fields are plain
//! strings; blanks render as an underscore run in the document so sales
//! staff can fill them in by hand.

use serde::{Deserialize, Serialize};

/// Customer-facing header fields for one quotation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuotationForm {
    pub customer_name: String,
    pub mobile: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub salesperson: String,
    /// Tax note, e.g. "18% GST extra".
    #[serde(default)]
    pub tax: String,
    /// Payment terms in days, kept as entered ("30", "45-60", ...).
    #[serde(default)]
    pub payment_days: String,
    #[serde(default)]
    pub remark: String,
}

impl QuotationForm {
    /// Fields required before a quotation may be submitted for delivery.
    /// Everything else is optional throughout.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.customer_name.trim().is_empty() {
            missing.push("customer_name");
        }
        if self.mobile.trim().is_empty() {
            missing.push("mobile");
        }
        missing
    }
}

/// Who generated the document, for the footer attribution line.
/// Supplied by the caller; the pipeline never fetches it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub display_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}
