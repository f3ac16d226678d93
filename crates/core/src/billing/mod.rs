//! Credit billing and communications usage.
//!
//! This module provides pure business logic for:
//! - Communications usage totals (WhatsApp and email)
//! - Per-clinic credit billing derived from orders
//! - Settlement summaries with a configurable balance ratio

pub mod service;
pub mod types;


pub use service::BillingService;
pub use types::{CreditBilling, CreditUsage, CreditUsageSummary, Settlement};
