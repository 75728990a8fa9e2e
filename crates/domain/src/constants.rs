//! Domain constants
//!
//! Centralized location for the fixed values the quotation pipeline depends
//! on: canonical column ordering, rendering placeholders, date formats and
//! the table-layout weight table.

use crate::types::ColumnKey;

// Fixed labels
pub const SR_NO_LABEL: &str = "Sr. No.";
pub const OTHER_GROUP_LABEL: &str = "Other";

// Rendering
pub const BLANK_PLACEHOLDER: &str = "________________";
pub const COMPOSITE_SEPARATOR: &str = " - ";

// Date/time formatting (24-hour, local to the caller-supplied instant)
pub const HEADER_DATE_TIME_FORMAT: &str = "%d/%m/%Y | %H:%M";
pub const FILE_NAME_DATE_FORMAT: &str = "%d-%m-%Y";

/// File name pattern: `Quotation_<customer>_<date>.pdf`
pub const FILE_NAME_PREFIX: &str = "Quotation";

/// Base width weight for a column, keyed by column key.
///
/// Weights are relative; the composer normalizes the visible columns'
/// weights so they sum to the available table width. Row-number columns are
/// narrow, the combined size/category column is the widest.
pub fn base_width_weight(key: ColumnKey) -> f64 {
    match key {
        ColumnKey::SrNo => 0.55,
        ColumnKey::SizeCategory => 2.6,
        ColumnKey::Size => 1.6,
        ColumnKey::Category => 1.4,
        ColumnKey::Series | ColumnKey::Finish => 1.2,
        ColumnKey::Packing | ColumnKey::SqFt | ColumnKey::Weight => 1.0,
        ColumnKey::Premium | ColumnKey::Standard | ColumnKey::Commercial | ColumnKey::Economy => {
            1.0
        }
    }
}
