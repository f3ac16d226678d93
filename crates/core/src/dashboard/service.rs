//! Dashboard metric calculations.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use super::types::{BillingDashboard, OrderDashboard};
use crate::billing::CreditBilling;
use crate::orders::{Order, OrderStatus};

/// Service for dashboard metrics.
pub struct DashboardService;

impl DashboardService {
    /// Computes order metrics relative to `today`.
    #[must_use]
    pub fn order_metrics(orders: &[Order], today: NaiveDate) -> OrderDashboard {
        orders
            .iter()
            .fold(OrderDashboard::default(), |mut metrics, order| {
                if order.date == today {
                    metrics.orders_today += 1;
                }
                if order.date.year() == today.year() && order.date.month() == today.month() {
                    metrics.orders_this_month += 1;
                }
                match order.status {
                    OrderStatus::Completed => metrics.completed_orders += 1,
                    OrderStatus::Pending => metrics.pending_orders += 1,
                    OrderStatus::Processing | OrderStatus::Cancelled => {}
                }
                metrics
            })
    }

    /// Computes billing metrics from per-clinic credit billing.
    #[must_use]
    pub fn billing_metrics(billing: &[CreditBilling]) -> BillingDashboard {
        let total_credits: u64 = billing.iter().map(|b| b.credits_used).sum();
        let total_amount_billed: Decimal = billing.iter().map(|b| b.amount_billed).sum();

        let average_credits_per_clinic = if billing.is_empty() {
            Decimal::ZERO
        } else {
            (Decimal::from(total_credits) / Decimal::from(billing.len()))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        };

        BillingDashboard {
            total_credits,
            total_amount_billed,
            active_clinics: billing.len(),
            average_credits_per_clinic,
        }
    }
}
