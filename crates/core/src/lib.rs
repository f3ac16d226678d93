//! Core reporting logic for Clinicdash.
//!
//! This crate contains pure aggregation and formatting with ZERO file or
//! artifact-writer dependencies. Everything here operates on in-memory slices.
//!
//! # Modules
//!
//! - `orders` - Order records, filtering and per-clinic rollups
//! - `billing` - Credit billing, communications usage and settlements
//! - `dashboard` - Headline metrics for the orders and billing pages
//! - `reports` - Schema-driven tabular formatting for spreadsheets and documents
//! - `source` - Read-only data source trait

pub mod billing;
pub mod dashboard;
pub mod orders;
pub mod reports;
pub mod source;

pub use source::DataSource;
