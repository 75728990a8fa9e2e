//! # TileQuote Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The quotation pipeline: column resolution, product grouping, cell
//!   extraction, pricing overlay and document composition
//! - Port/adapter interfaces (traits) the infra layer implements
//! - The quotation session owned by the caller
//!
//! ## Architecture Principles
//! - Only depends on `tilequote-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod columns;
pub mod compose;
pub mod extract;
pub mod grouping;
pub mod overlay;
pub mod ports;
pub mod service;
pub mod session;

// Re-export specific items to avoid ambiguity
pub use columns::resolve_columns;
pub use compose::{compose, ComposeRequest};
pub use extract::cell_value;
pub use grouping::group_products;
pub use overlay::PricingOverlay;
pub use ports::{MessagingGateway, ObjectStore, ProductSource, TenantConfigSource};
pub use service::{notification_message, QuotationService};
pub use session::QuotationSession;
