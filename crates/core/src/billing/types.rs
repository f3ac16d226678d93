//! Billing data types.

use chrono::NaiveDate;
use clinicdash_shared::types::ClinicId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Communications usage for one clinic over the reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditUsage {
    /// Clinic ID.
    pub clinic_id: ClinicId,
    /// Clinic name.
    pub clinic_name: String,
    /// WhatsApp messages sent.
    pub whatsapp_messages: u32,
    /// Email messages sent.
    pub email_messages: u32,
    /// Revenue from WhatsApp messages.
    pub whatsapp_revenue: Decimal,
    /// Revenue from email messages.
    pub email_revenue: Decimal,
    /// Date of the clinic's last order.
    pub last_order_date: NaiveDate,
}

impl CreditUsage {
    /// Messages across both channels.
    #[must_use]
    pub fn total_messages(&self) -> u64 {
        u64::from(self.whatsapp_messages) + u64::from(self.email_messages)
    }

    /// Revenue across both channels.
    #[must_use]
    pub fn total_revenue(&self) -> Decimal {
        self.whatsapp_revenue + self.email_revenue
    }
}

/// Totals over a set of communications usage records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditUsageSummary {
    /// WhatsApp messages across all clinics.
    pub total_whatsapp: u64,
    /// Email messages across all clinics.
    pub total_email: u64,
    /// Revenue across both channels and all clinics.
    pub total_revenue: Decimal,
    /// Messages per clinic, rounded to two decimals; zero with no clinics.
    pub average_per_clinic: Decimal,
}

impl CreditUsageSummary {
    /// Messages across both channels.
    #[must_use]
    pub const fn total_messages(&self) -> u64 {
        self.total_whatsapp + self.total_email
    }
}

/// Credits consumed and amount billed for one clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditBilling {
    /// Clinic ID.
    pub clinic_id: ClinicId,
    /// Clinic name.
    pub clinic_name: String,
    /// Sum of order credits.
    pub credits_used: u64,
    /// Number of orders.
    pub total_orders: usize,
    /// Date of the latest order.
    pub last_order_date: NaiveDate,
    /// Sum of order totals.
    pub amount_billed: Decimal,
}

/// Settlement summary across all clinic orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Number of orders settled.
    pub total_orders: usize,
    /// Credits consumed by those orders.
    pub total_credits: u64,
    /// Sum of order totals.
    pub payable_amount: Decimal,
    /// Balance held back, `payable_amount * balance_ratio` rounded to cents.
    pub balance: Decimal,
}
