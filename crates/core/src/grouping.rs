//! Product grouping engine
//!
//! Partitions a flat catalog snapshot into named groups, one per distinct
//! display name. Grouping is stable in both dimensions: groups appear in
//! order of first occurrence, rows keep their input order, and
//! concatenating all groups reproduces the input exactly.

use std::collections::HashMap;

use tilequote_domain::constants::OTHER_GROUP_LABEL;
use tilequote_domain::{ProductGroup, ProductRecord};

/// Group products by exact display-name equality.
///
/// Products with a missing or blank name fall into a single fallback group
/// labelled "Other", which takes its position from the first unnamed
/// product seen. Empty input yields no groups; there is no error path.
pub fn group_products(products: &[ProductRecord]) -> Vec<ProductGroup> {
    let mut groups: Vec<ProductGroup> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for product in products {
        let name = product.display_name().unwrap_or(OTHER_GROUP_LABEL);
        let index = *index_by_name.entry(name.to_string()).or_insert_with(|| {
            groups.push(ProductGroup { name: name.to_string(), products: Vec::new() });
            groups.len() - 1
        });
        groups[index].products.push(product.clone());
    }

    groups
}
