//! Tenant configuration types
//!
//! Tenants choose which optional product attributes appear on a quotation
//! (and under what label) and which pricing grades are offered. The config
//! arrives as a loosely-typed JSON blob from the tenant store; everything
//! here is written to default safely rather than fail hard.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Closed set of configurable product attributes, in canonical column
/// order. Wire names match the tenant-config store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKey {
    #[serde(rename = "product_size")]
    Size,
    #[serde(rename = "product_category")]
    Category,
    #[serde(rename = "product_series")]
    Series,
    #[serde(rename = "product_finish")]
    Finish,
    /// Historic feeds used both `packing` and `pcsperbox` for this one.
    #[serde(rename = "product_pieces_per_box", alias = "packing", alias = "pcsperbox")]
    PiecesPerBox,
    #[serde(rename = "product_sq_ft_box")]
    SqFtPerBox,
    #[serde(rename = "product_weight")]
    Weight,
}

impl AttributeKey {
    /// Canonical ordering of attribute columns in the output document.
    pub const CANONICAL: [Self; 7] = [
        Self::Size,
        Self::Category,
        Self::Series,
        Self::Finish,
        Self::PiecesPerBox,
        Self::SqFtPerBox,
        Self::Weight,
    ];

    pub fn wire_key(self) -> &'static str {
        match self {
            Self::Size => "product_size",
            Self::Category => "product_category",
            Self::Series => "product_series",
            Self::Finish => "product_finish",
            Self::PiecesPerBox => "product_pieces_per_box",
            Self::SqFtPerBox => "product_sq_ft_box",
            Self::Weight => "product_weight",
        }
    }
}

/// Closed set of pricing grades, in canonical column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GradeKey {
    #[serde(rename = "pre_grade")]
    Premium,
    #[serde(rename = "std_grade")]
    Standard,
    #[serde(rename = "com_grade")]
    Commercial,
    #[serde(rename = "eco_grade")]
    Economy,
}

impl GradeKey {
    /// Canonical ordering of grade columns in the output document.
    pub const CANONICAL: [Self; 4] =
        [Self::Premium, Self::Standard, Self::Commercial, Self::Economy];

    pub fn wire_key(self) -> &'static str {
        match self {
            Self::Premium => "pre_grade",
            Self::Standard => "std_grade",
            Self::Commercial => "com_grade",
            Self::Economy => "eco_grade",
        }
    }

    /// Fixed short label for the grade column header.
    pub fn short_label(self) -> &'static str {
        match self {
            Self::Premium => "Prem.",
            Self::Standard => "Std",
            Self::Commercial => "Com",
            Self::Economy => "Eco",
        }
    }
}

/// Per-tenant field labelling and grade enablement.
///
/// Invariant: a column derived from an attribute/grade key appears in the
/// output if and only if that key is present here with real content; an
/// absent key omits the column entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenantFieldConfig {
    #[serde(default)]
    pub field_labels: HashMap<AttributeKey, String>,
    #[serde(default)]
    pub grade_flags: HashMap<GradeKey, bool>,
}

impl TenantFieldConfig {
    /// Tenant label for an attribute, if configured with non-blank content.
    pub fn label(&self, key: AttributeKey) -> Option<&str> {
        self.field_labels.get(&key).map(String::as_str).map(str::trim).filter(|l| !l.is_empty())
    }

    /// Whether the tenant exposes a pricing grade.
    pub fn grade_enabled(&self, key: GradeKey) -> bool {
        self.grade_flags.get(&key).copied().unwrap_or(false)
    }

    /// Lenient construction from a loosely-typed JSON blob.
    ///
    /// Any shape that cannot be interpreted defaults to "nothing enabled"
    /// rather than failing: a non-object where a map was expected drops
    /// that map, unknown keys are skipped, and non-string label values /
    /// non-bool flag values are ignored. Malformations are logged.
    pub fn from_value(value: serde_json::Value) -> Self {
        let serde_json::Value::Object(root) = value else {
            if !value.is_null() {
                warn!(got = %value, "tenant config is not an object, defaulting to empty");
            }
            return Self::default();
        };

        let mut config = Self::default();

        if let Some(labels) = root.get("field_labels") {
            match labels {
                serde_json::Value::Object(map) => {
                    for (key, val) in map {
                        let Ok(attr) =
                            serde_json::from_value::<AttributeKey>(serde_json::json!(key))
                        else {
                            warn!(key, "unknown attribute key in tenant config, skipping");
                            continue;
                        };
                        match val.as_str() {
                            Some(label) => {
                                config.field_labels.insert(attr, label.to_string());
                            }
                            None => warn!(key, "non-string label in tenant config, skipping"),
                        }
                    }
                }
                other => {
                    warn!(got = %other, "field_labels is not a map, defaulting to empty");
                }
            }
        }

        if let Some(flags) = root.get("grade_flags") {
            match flags {
                serde_json::Value::Object(map) => {
                    for (key, val) in map {
                        let Ok(grade) = serde_json::from_value::<GradeKey>(serde_json::json!(key))
                        else {
                            warn!(key, "unknown grade key in tenant config, skipping");
                            continue;
                        };
                        match val.as_bool() {
                            Some(enabled) => {
                                config.grade_flags.insert(grade, enabled);
                            }
                            None => warn!(key, "non-bool grade flag in tenant config, skipping"),
                        }
                    }
                }
                other => {
                    warn!(got = %other, "grade_flags is not a map, defaulting to empty");
                }
            }
        }

        config
    }
}
