//! Pricing overlay store
//!
//! Session-scoped, user-entered price strings keyed by product and grade,
//! overlaid onto the read-only catalog snapshot. Values are free text and
//! accepted verbatim; sales staff enter ad-hoc notations ("on request",
//! "—") alongside numbers.
//!
//! The overlay lives only as long as the quotation-editing session. It may
//! be mirrored to client-local storage through the session's JSON
//! round-trip, but is never written to the shared relational store.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tilequote_domain::{GradeKey, ProductId};

/// Immutable per-product grade prices, shared out as a snapshot.
pub type GradePrices = BTreeMap<GradeKey, String>;

/// Editable overlay of user-entered prices.
///
/// `set` is a structural update: the per-product record is replaced with a
/// merged copy, so snapshots handed out earlier are never mutated and stay
/// safe for concurrent reads by independent renderers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingOverlay {
    entries: BTreeMap<ProductId, Arc<GradePrices>>,
}

impl PricingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a price string, creating the product entry lazily on first
    /// edit. No validation: the value round-trips exactly as entered.
    pub fn set(&mut self, product: &ProductId, grade: GradeKey, value: impl Into<String>) {
        let mut merged =
            self.entries.get(product).map(|prices| (**prices).clone()).unwrap_or_default();
        merged.insert(grade, value.into());
        self.entries.insert(product.clone(), Arc::new(merged));
    }

    /// The stored price string, or `None` when never edited.
    pub fn get(&self, product: &ProductId, grade: GradeKey) -> Option<&str> {
        self.entries.get(product).and_then(|prices| prices.get(&grade)).map(String::as_str)
    }

    /// Snapshot of all prices for one product. The returned record is
    /// immutable; later edits replace the entry rather than touching it.
    pub fn snapshot(&self, product: &ProductId) -> Option<Arc<GradePrices>> {
        self.entries.get(product).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of products with at least one entered price.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
