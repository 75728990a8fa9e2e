//! # TileQuote Domain
//!
//! Business domain types and models for TileQuote.
//!
//! This crate contains:
//! - Domain data types (ProductRecord, TenantFieldConfig, Column, etc.)
//! - Domain error types and Result definitions
//! - Domain constants (canonical column orders, layout weights, formats)
//!
//! ## Architecture
//! - No dependencies on other TileQuote crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
