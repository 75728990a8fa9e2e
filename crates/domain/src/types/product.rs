//! Product catalog types
//!
//! Product rows are fetched per tenant from the external catalog source and
//! treated as a read-only snapshot for the duration of one compose cycle.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque product identifier.
///
/// Catalog backends are inconsistent about id types (numeric in some
/// tenants, string in others), so deserialization accepts both and
/// normalizes to a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::String(s) => Ok(Self(s)),
            serde_json::Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "product id must be a string or number, got {other}"
            ))),
        }
    }
}

/// One catalog row. Immutable within a quotation session.
///
/// All descriptive fields are optional; a missing field renders as an empty
/// cell, never as the literal "null".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub finish: Option<String>,
    /// Packaging count. Legacy feeds call this `packing` or `pcsperbox`.
    #[serde(default, alias = "packing", alias = "pcsperbox")]
    pub pieces_per_box: Option<f64>,
    #[serde(default, alias = "sq_ft_box")]
    pub sq_ft_per_box: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl ProductRecord {
    /// Display name used for grouping; `None` and blank both mean unnamed.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

/// Catalog rows sharing one display name, rendered as one sub-table.
///
/// Recomputed wholesale whenever the raw product list changes; never
/// mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductGroup {
    pub name: String,
    pub products: Vec<ProductRecord>,
}
