//! Domain data types
//!
//! One file per concern, re-exported flat for convenient downstream use.

pub mod columns;
pub mod product;
pub mod quotation;
pub mod tenant;

pub use columns::{Column, ColumnKey, TableTemplate};
pub use product::{ProductGroup, ProductId, ProductRecord};
pub use quotation::{Identity, QuotationForm};
pub use tenant::{AttributeKey, GradeKey, TenantFieldConfig};
