//! Cell value extractor
//!
//! Computes the exact string rendered into one table cell, as a pure
//! function of the product record, the column key, the row index and the
//! pricing overlay. The overlay lookup is the only read of mutable session
//! state; everything else comes from the read-only catalog snapshot.

use tilequote_domain::constants::COMPOSITE_SEPARATOR;
use tilequote_domain::{ColumnKey, ProductRecord};

use crate::overlay::PricingOverlay;

/// Render the cell value for one product/column pair.
///
/// * `SrNo` renders `row_index + 1` when an index is supplied (it always is
///   inside a group table) and an empty string otherwise.
/// * Attribute columns render the backing field; missing fields render as
///   an empty string, never the literal "null".
/// * The composite size/category column joins both fields with `" - "`
///   even when one side is empty.
/// * Grade columns read the overlay; an entry absent there is empty.
///
/// The function never fails: the key set is closed, and every key has a
/// rule here. Calling it twice with identical arguments yields identical
/// strings.
pub fn cell_value(
    product: &ProductRecord,
    key: ColumnKey,
    row_index: Option<usize>,
    overlay: &PricingOverlay,
) -> String {
    match key {
        ColumnKey::SrNo => row_index.map(|i| (i + 1).to_string()).unwrap_or_default(),
        ColumnKey::Size => text_or_empty(product.size.as_deref()),
        ColumnKey::Category => text_or_empty(product.category.as_deref()),
        ColumnKey::SizeCategory => format!(
            "{}{}{}",
            text_or_empty(product.size.as_deref()),
            COMPOSITE_SEPARATOR,
            text_or_empty(product.category.as_deref())
        ),
        ColumnKey::Series => text_or_empty(product.series.as_deref()),
        ColumnKey::Finish => text_or_empty(product.finish.as_deref()),
        ColumnKey::Packing => number_or_empty(product.pieces_per_box),
        ColumnKey::SqFt => number_or_empty(product.sq_ft_per_box),
        ColumnKey::Weight => number_or_empty(product.weight),
        ColumnKey::Premium | ColumnKey::Standard | ColumnKey::Commercial | ColumnKey::Economy => {
            // The resolver is the sole producer of keys, so the grade is
            // always present on this arm.
            key.grade()
                .and_then(|grade| overlay.get(&product.id, grade))
                .unwrap_or_default()
                .to_string()
        }
    }
}

fn text_or_empty(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// Default decimal conversion: `4.0` renders as "4", `4.5` as "4.5".
fn number_or_empty(value: Option<f64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use tilequote_domain::{GradeKey, ProductId};

    use super::*;

    fn product() -> ProductRecord {
        ProductRecord {
            id: ProductId::from("p1"),
            name: Some("Tile A".into()),
            category: Some("Floor".into()),
            size: Some("600x600".into()),
            series: None,
            finish: Some("Glossy".into()),
            pieces_per_box: Some(4.0),
            sq_ft_per_box: Some(15.5),
            weight: None,
        }
    }

    #[test]
    fn sr_no_is_one_based_and_empty_without_an_index() {
        let overlay = PricingOverlay::new();
        assert_eq!(cell_value(&product(), ColumnKey::SrNo, Some(0), &overlay), "1");
        assert_eq!(cell_value(&product(), ColumnKey::SrNo, Some(9), &overlay), "10");
        assert_eq!(cell_value(&product(), ColumnKey::SrNo, None, &overlay), "");
    }

    #[test]
    fn missing_fields_render_empty_not_null() {
        let overlay = PricingOverlay::new();
        assert_eq!(cell_value(&product(), ColumnKey::Series, Some(0), &overlay), "");
        assert_eq!(cell_value(&product(), ColumnKey::Weight, Some(0), &overlay), "");
    }

    #[test]
    fn numeric_fields_use_default_decimal_conversion() {
        let overlay = PricingOverlay::new();
        assert_eq!(cell_value(&product(), ColumnKey::Packing, Some(0), &overlay), "4");
        assert_eq!(cell_value(&product(), ColumnKey::SqFt, Some(0), &overlay), "15.5");
    }

    #[test]
    fn composite_column_keeps_the_separator_when_one_side_is_empty() {
        let overlay = PricingOverlay::new();
        assert_eq!(
            cell_value(&product(), ColumnKey::SizeCategory, Some(0), &overlay),
            "600x600 - Floor"
        );

        let mut no_category = product();
        no_category.category = None;
        assert_eq!(
            cell_value(&no_category, ColumnKey::SizeCategory, Some(0), &overlay),
            "600x600 - "
        );
    }

    #[test]
    fn grade_columns_read_the_overlay_or_empty() {
        let mut overlay = PricingOverlay::new();
        assert_eq!(cell_value(&product(), ColumnKey::Standard, Some(0), &overlay), "");

        overlay.set(&ProductId::from("p1"), GradeKey::Standard, "850");
        assert_eq!(cell_value(&product(), ColumnKey::Standard, Some(0), &overlay), "850");
        // Other grades stay empty.
        assert_eq!(cell_value(&product(), ColumnKey::Economy, Some(0), &overlay), "");
    }

    #[test]
    fn extraction_is_pure() {
        let mut overlay = PricingOverlay::new();
        overlay.set(&ProductId::from("p1"), GradeKey::Premium, "1000");
        let first = cell_value(&product(), ColumnKey::Premium, Some(3), &overlay);
        let second = cell_value(&product(), ColumnKey::Premium, Some(3), &overlay);
        assert_eq!(first, second);
    }
}
