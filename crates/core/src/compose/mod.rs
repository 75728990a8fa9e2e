//! Document composer
//!
//! Turns resolved columns, grouped products and the pricing overlay into a
//! paginated PDF. `layout` owns the vertical-flow state machine and
//! page-break policy; `pdf` owns byte-exact serialization.

pub mod layout;
pub mod pdf;

pub use layout::{compose, ComposeRequest};
pub use pdf::{DocumentBuilder, Font, PAGE_HEIGHT, PAGE_WIDTH};
