//! Output column model
//!
//! The closed set of internal column keys the renderer understands. Tenant
//! configuration decides which of these appear; the key set itself never
//! varies per tenant.

use serde::{Deserialize, Serialize};

use crate::types::tenant::{AttributeKey, GradeKey};

/// Internal identifier for an output column.
///
/// The two legacy quotation surfaces disagreed on key naming (`packing` vs
/// `pcsperbox`); this enum is the single canonical set, with the legacy
/// spellings accepted as serde aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKey {
    SrNo,
    Size,
    Category,
    /// Combined "size - category" column used by the combined template.
    SizeCategory,
    Series,
    Finish,
    #[serde(alias = "pcsperbox")]
    Packing,
    SqFt,
    Weight,
    Premium,
    Standard,
    Commercial,
    Economy,
}

impl ColumnKey {
    /// Whether this key is one of the four pricing-grade columns.
    pub fn is_grade(self) -> bool {
        self.grade().is_some()
    }

    /// The grade behind a pricing column, if any.
    pub fn grade(self) -> Option<GradeKey> {
        match self {
            Self::Premium => Some(GradeKey::Premium),
            Self::Standard => Some(GradeKey::Standard),
            Self::Commercial => Some(GradeKey::Commercial),
            Self::Economy => Some(GradeKey::Economy),
            _ => None,
        }
    }
}

impl From<GradeKey> for ColumnKey {
    fn from(grade: GradeKey) -> Self {
        match grade {
            GradeKey::Premium => Self::Premium,
            GradeKey::Standard => Self::Standard,
            GradeKey::Commercial => Self::Commercial,
            GradeKey::Economy => Self::Economy,
        }
    }
}

impl From<AttributeKey> for ColumnKey {
    fn from(attr: AttributeKey) -> Self {
        match attr {
            AttributeKey::Size => Self::Size,
            AttributeKey::Category => Self::Category,
            AttributeKey::Series => Self::Series,
            AttributeKey::Finish => Self::Finish,
            AttributeKey::PiecesPerBox => Self::Packing,
            AttributeKey::SqFtPerBox => Self::SqFt,
            AttributeKey::Weight => Self::Weight,
        }
    }
}

/// One resolved output column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub key: ColumnKey,
    pub label: String,
    pub visible: bool,
}

impl Column {
    pub fn new(key: ColumnKey, label: impl Into<String>) -> Self {
        Self { key, label: label.into(), visible: true }
    }
}

/// Which of the two quotation table layouts to render.
///
/// The legacy system had two near-identical entry surfaces, one with
/// separate size and category columns and one with a combined
/// "size - category" column. The choice is an explicit setting here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableTemplate {
    #[default]
    Separate,
    Combined,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_keys_round_trip_through_column_keys() {
        for grade in GradeKey::CANONICAL {
            let key = ColumnKey::from(grade);
            assert!(key.is_grade());
            assert_eq!(key.grade(), Some(grade));
        }
    }

    #[test]
    fn attribute_keys_are_never_grades() {
        for attr in AttributeKey::CANONICAL {
            assert!(!ColumnKey::from(attr).is_grade());
        }
    }

    #[test]
    fn legacy_pcsperbox_spelling_deserializes_to_packing() {
        let key: ColumnKey = serde_json::from_str("\"pcsperbox\"").unwrap();
        assert_eq!(key, ColumnKey::Packing);
    }
}
