//! # TileQuote Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client with timeout/retry support
//! - Catalog and tenant-config source adapters
//! - Object-store and messaging-gateway adapters
//! - The delivery service (download / upload-and-notify)
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `tilequote-core`
//! - Depends on `tilequote-domain` and `tilequote-core`
//! - Contains all "impure" code (network I/O, filesystem)

pub mod catalog;
pub mod config;
pub mod delivery;
pub mod errors;
pub mod http;
pub mod messaging;
pub mod storage;

// Re-export commonly used items
pub use catalog::{HttpProductSource, HttpTenantConfigSource};
pub use delivery::{DeliveryReceipt, DeliveryService, NamedDocument};
pub use errors::InfraError;
pub use http::HttpClient;
pub use messaging::WhatsAppGateway;
pub use storage::HttpObjectStore;
