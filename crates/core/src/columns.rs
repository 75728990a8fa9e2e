//! Column schema resolver
//!
//! Derives the ordered list of output columns from tenant configuration.
//! The visible column set is a pure function of the config and the chosen
//! table template only; product data never influences it.

use tilequote_domain::constants::SR_NO_LABEL;
use tilequote_domain::{AttributeKey, Column, ColumnKey, TableTemplate, TenantFieldConfig};

/// Resolve the ordered output columns for a tenant.
///
/// Ordering is fixed: the row-number column first, then attribute columns
/// in canonical order for every attribute the tenant labelled, then grade
/// columns in canonical order (Premium, Standard, Commercial, Economy) for
/// every enabled grade. An unlabelled attribute or disabled grade omits the
/// column entirely; there are no hidden/empty columns.
///
/// With [`TableTemplate::Combined`], a labelled size attribute folds size
/// and category into one composite column carrying the size label; the
/// separate category column is then skipped even when labelled.
///
/// Absent or malformed config simply yields the row-number column alone;
/// this function has no error path.
pub fn resolve_columns(config: &TenantFieldConfig, template: TableTemplate) -> Vec<Column> {
    let mut columns = vec![Column::new(ColumnKey::SrNo, SR_NO_LABEL)];

    for attr in AttributeKey::CANONICAL {
        let Some(label) = config.label(attr) else {
            continue;
        };

        if template == TableTemplate::Combined {
            match attr {
                AttributeKey::Size => {
                    columns.push(Column::new(ColumnKey::SizeCategory, label));
                    continue;
                }
                AttributeKey::Category => continue,
                _ => {}
            }
        }

        columns.push(Column::new(ColumnKey::from(attr), label));
    }

    for grade in tilequote_domain::GradeKey::CANONICAL {
        if config.grade_enabled(grade) {
            columns.push(Column::new(ColumnKey::from(grade), grade.short_label()));
        }
    }

    columns
}

#[cfg(test)]
mod tests {
    use tilequote_domain::GradeKey;

    use super::*;

    fn config(labels: &[(AttributeKey, &str)], grades: &[GradeKey]) -> TenantFieldConfig {
        let mut config = TenantFieldConfig::default();
        for (key, label) in labels {
            config.field_labels.insert(*key, (*label).to_string());
        }
        for grade in grades {
            config.grade_flags.insert(*grade, true);
        }
        config
    }

    fn keys(columns: &[Column]) -> Vec<ColumnKey> {
        columns.iter().map(|c| c.key).collect()
    }

    #[test]
    fn empty_config_yields_row_number_only() {
        let columns = resolve_columns(&TenantFieldConfig::default(), TableTemplate::Separate);
        assert_eq!(keys(&columns), vec![ColumnKey::SrNo]);
        assert_eq!(columns[0].label, "Sr. No.");
        assert!(columns[0].visible);
    }

    #[test]
    fn attribute_order_is_canonical_regardless_of_insertion_order() {
        // Insert in reverse of canonical order; output must not change.
        let config = config(
            &[
                (AttributeKey::Weight, "Wt"),
                (AttributeKey::Series, "Series"),
                (AttributeKey::Size, "Size"),
            ],
            &[],
        );
        let columns = resolve_columns(&config, TableTemplate::Separate);
        assert_eq!(
            keys(&columns),
            vec![ColumnKey::SrNo, ColumnKey::Size, ColumnKey::Series, ColumnKey::Weight]
        );
    }

    #[test]
    fn labels_are_tenant_supplied_verbatim() {
        let config = config(&[(AttributeKey::SqFtPerBox, "Coverage (sq.ft)")], &[]);
        let columns = resolve_columns(&config, TableTemplate::Separate);
        assert_eq!(columns[1].label, "Coverage (sq.ft)");
        assert_eq!(columns[1].key, ColumnKey::SqFt);
    }

    #[test]
    fn grade_columns_follow_attributes_in_canonical_order() {
        let config = config(
            &[(AttributeKey::Size, "Size")],
            &[GradeKey::Economy, GradeKey::Premium, GradeKey::Standard],
        );
        let columns = resolve_columns(&config, TableTemplate::Separate);
        assert_eq!(
            keys(&columns),
            vec![
                ColumnKey::SrNo,
                ColumnKey::Size,
                ColumnKey::Premium,
                ColumnKey::Standard,
                ColumnKey::Economy
            ]
        );
        let labels: Vec<&str> = columns[2..].iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Prem.", "Std", "Eco"]);
    }

    #[test]
    fn disabled_grade_flag_omits_the_column() {
        let mut config = config(&[], &[GradeKey::Standard]);
        config.grade_flags.insert(GradeKey::Economy, false);
        let columns = resolve_columns(&config, TableTemplate::Separate);
        assert_eq!(keys(&columns), vec![ColumnKey::SrNo, ColumnKey::Standard]);
    }

    #[test]
    fn combined_template_folds_size_and_category() {
        let config = config(
            &[(AttributeKey::Size, "Size"), (AttributeKey::Category, "Category")],
            &[GradeKey::Standard],
        );
        let columns = resolve_columns(&config, TableTemplate::Combined);
        assert_eq!(
            keys(&columns),
            vec![ColumnKey::SrNo, ColumnKey::SizeCategory, ColumnKey::Standard]
        );
        // The composite column carries the tenant's size label.
        assert_eq!(columns[1].label, "Size");
    }

    #[test]
    fn combined_template_without_size_label_omits_category_too() {
        let config = config(&[(AttributeKey::Category, "Category")], &[]);
        let columns = resolve_columns(&config, TableTemplate::Combined);
        assert_eq!(keys(&columns), vec![ColumnKey::SrNo]);
    }
}
