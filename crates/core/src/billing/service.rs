//! Billing service.

use std::collections::HashMap;

use clinicdash_shared::types::ClinicId;
use rust_decimal::{Decimal, RoundingStrategy};

use super::types::{CreditBilling, CreditUsage, CreditUsageSummary, Settlement};
use crate::orders::Order;

/// Service for billing and communications aggregates.
pub struct BillingService;

impl BillingService {
    /// Sums message counts and revenue across usage records.
    ///
    /// `average_per_clinic` is total messages over the number of records,
    /// rounded to two decimals half away from zero, and zero when `usages` is
    /// empty.
    #[must_use]
    pub fn summarize_credit_usage(usages: &[CreditUsage]) -> CreditUsageSummary {
        let total_whatsapp: u64 = usages.iter().map(|u| u64::from(u.whatsapp_messages)).sum();
        let total_email: u64 = usages.iter().map(|u| u64::from(u.email_messages)).sum();
        let total_revenue: Decimal = usages.iter().map(CreditUsage::total_revenue).sum();

        let average_per_clinic = if usages.is_empty() {
            Decimal::ZERO
        } else {
            (Decimal::from(total_whatsapp + total_email) / Decimal::from(usages.len()))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        };

        CreditUsageSummary {
            total_whatsapp,
            total_email,
            total_revenue,
            average_per_clinic,
        }
    }

    /// Derives per-clinic credit billing from orders.
    ///
    /// Output follows the first occurrence of each clinic in `orders`.
    #[must_use]
    pub fn credit_billing_by_clinic(orders: &[Order]) -> Vec<CreditBilling> {
        let mut billing: Vec<CreditBilling> = Vec::new();
        let mut index: HashMap<&ClinicId, usize> = HashMap::new();

        for order in orders {
            if let Some(&slot) = index.get(&order.clinic_id) {
                let entry = &mut billing[slot];
                entry.credits_used += u64::from(order.credits);
                entry.total_orders += 1;
                entry.amount_billed += order.total_amount;
                entry.last_order_date = entry.last_order_date.max(order.date);
            } else {
                index.insert(&order.clinic_id, billing.len());
                billing.push(CreditBilling {
                    clinic_id: order.clinic_id.clone(),
                    clinic_name: order.clinic_name.clone(),
                    credits_used: u64::from(order.credits),
                    total_orders: 1,
                    last_order_date: order.date,
                    amount_billed: order.total_amount,
                });
            }
        }

        billing
    }

    /// Computes the settlement summary for a set of orders.
    #[must_use]
    pub fn settlement(orders: &[Order], balance_ratio: Decimal) -> Settlement {
        let payable_amount: Decimal = orders.iter().map(|o| o.total_amount).sum();

        Settlement {
            total_orders: orders.len(),
            total_credits: orders.iter().map(|o| u64::from(o.credits)).sum(),
            payable_amount,
            balance: Self::balance(payable_amount, balance_ratio),
        }
    }

    /// Share of `amount` reported as balance, rounded to cents.
    #[must_use]
    pub fn balance(amount: Decimal, balance_ratio: Decimal) -> Decimal {
        (amount * balance_ratio).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}
