//! Dashboard metrics.
//!
//! This module provides the headline figures shown above the order and
//! billing tables:
//! - Order counts for today, this month, and by status
//! - Credit and billing totals per clinic

pub mod service;
pub mod types;

pub use service::DashboardService;
pub use types::*;
