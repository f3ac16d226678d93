//! Dashboard data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order metrics for the orders page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDashboard {
    /// Orders dated today.
    pub orders_today: usize,
    /// Orders dated in today's calendar month.
    pub orders_this_month: usize,
    /// Completed orders.
    pub completed_orders: usize,
    /// Pending orders.
    pub pending_orders: usize,
}

/// Billing metrics for the billing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingDashboard {
    /// Credits consumed across all clinics.
    pub total_credits: u64,
    /// Amount billed across all clinics.
    pub total_amount_billed: Decimal,
    /// Clinics with at least one order.
    pub active_clinics: usize,
    /// Credits per clinic, rounded to a whole credit.
    pub average_credits_per_clinic: Decimal,
}
