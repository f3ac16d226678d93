//! Order data types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use clinicdash_shared::types::{ClinicId, OrderId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::OrderError;

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Received, not yet picked up by a pharmacy.
    Pending,
    /// Being fulfilled.
    Processing,
    /// Delivered.
    Completed,
    /// Cancelled before fulfillment.
    Cancelled,
}

impl OrderStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Processing,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(OrderError::UnknownStatus(s.to_string())),
        }
    }
}

/// A clinic order fulfilled by a pharmacy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// Human-facing order number (e.g. `ORD-2024-001`).
    pub order_number: String,
    /// Ordering clinic.
    pub clinic_id: ClinicId,
    /// Clinic name, denormalized at order time.
    pub clinic_name: String,
    /// Order date.
    pub date: NaiveDate,
    /// Current status.
    pub status: OrderStatus,
    /// Number of line items.
    pub items_count: u32,
    /// Order total.
    pub total_amount: Decimal,
    /// Credits consumed by the order.
    pub credits: u32,
    /// Pharmacy fulfilling the order.
    pub fulfillment_pharmacy: String,
}

/// Clinic reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinic {
    /// Clinic ID.
    pub id: ClinicId,
    /// Display name.
    pub name: String,
    /// Location or district.
    pub location: String,
    /// Contact person.
    pub contact_person: String,
    /// Contact email.
    pub contact_email: String,
}

/// Per-clinic rollup of orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicOrderSummary {
    /// Clinic ID.
    pub clinic_id: ClinicId,
    /// Clinic name from the representative order.
    pub clinic_name: String,
    /// Date of the most recent order.
    pub last_order_date: NaiveDate,
    /// Pharmacy of the most recent order.
    pub fulfillment_pharmacy: String,
    /// Status of the most recent order.
    pub status: OrderStatus,
    /// Number of orders placed by the clinic.
    pub total_orders: usize,
}

/// Aggregate totals over a set of orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Number of orders.
    pub count: usize,
    /// Sum of order totals.
    pub total_amount: Decimal,
    /// Sum of credits.
    pub total_credits: u64,
    /// Sum of item counts.
    pub total_items: u64,
    /// Order count per status; statuses with no orders are absent.
    pub count_by_status: BTreeMap<OrderStatus, usize>,
}

impl OrderSummary {
    /// Returns the number of orders with the given status.
    #[must_use]
    pub fn status_count(&self, status: OrderStatus) -> usize {
        self.count_by_status.get(&status).copied().unwrap_or(0)
    }
}

/// A clinic together with all of its orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicOrders {
    /// The clinic.
    pub clinic: Clinic,
    /// The clinic's orders in source order.
    pub orders: Vec<Order>,
}
