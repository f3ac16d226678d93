//! Report kinds and their column schemas.
//!
//! Column order is part of each report's contract: changing a schema's column
//! set or order requires bumping its version.

use serde::{Deserialize, Serialize};

use super::schema::{ColumnSpec, ReportSchema};
use crate::billing::{CreditBilling, CreditUsage};
use crate::orders::{ClinicOrderSummary, Order};

/// Kinds of report the dashboard can export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// All (filtered) clinic orders.
    Orders,
    /// Credits consumed and amount billed per clinic.
    CreditBilling,
    /// WhatsApp and email usage per clinic.
    Communications,
    /// Latest order and order count per clinic.
    ClinicSummaries,
    /// Orders of a single clinic.
    ClinicOrders,
}

impl ReportKind {
    /// Document title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Orders => "Clinic Orders Report",
            Self::CreditBilling => "Credit Billing Report",
            Self::Communications => "Communications Billing Report",
            Self::ClinicSummaries => "Clinic Orders Summary",
            Self::ClinicOrders => "Clinic Order Details",
        }
    }

    /// Worksheet name.
    #[must_use]
    pub const fn sheet_name(self) -> &'static str {
        match self {
            Self::Orders => "Orders",
            Self::CreditBilling => "Credit Usage",
            Self::Communications => "Communications",
            Self::ClinicSummaries => "Clinic Summaries",
            Self::ClinicOrders => "Clinic Orders",
        }
    }

    /// Default file name without extension.
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Orders => "clinic_orders",
            Self::CreditBilling => "credit_billing",
            Self::Communications => "communications",
            Self::ClinicSummaries => "clinic_summaries",
            Self::ClinicOrders => "clinic_order_details",
        }
    }

    /// Whether the table ends with a totals row.
    #[must_use]
    pub const fn has_totals(self) -> bool {
        matches!(self, Self::CreditBilling | Self::Communications)
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Orders: Order Number, Clinic Name, Date, Status, Items Count, Total Amount, Credits Used.
#[must_use]
pub fn orders_schema() -> ReportSchema<Order> {
    ReportSchema::new("orders", 1)
        .column(
            ColumnSpec::text("Order Number", |o: &Order| o.order_number.clone()).short("Order #"),
        )
        .column(ColumnSpec::text("Clinic Name", |o: &Order| o.clinic_name.clone()).short("Clinic"))
        .column(ColumnSpec::date("Date", |o: &Order| o.date))
        .column(ColumnSpec::status("Status", |o: &Order| o.status))
        .column(
            ColumnSpec::count("Items Count", |o: &Order| u64::from(o.items_count)).short("Items"),
        )
        .column(ColumnSpec::money("Total Amount", |o: &Order| o.total_amount).short("Amount"))
        .column(
            ColumnSpec::count("Credits Used", |o: &Order| u64::from(o.credits)).short("Credits"),
        )
}

/// Credit billing: Clinic Name, Credits Used, Total Orders, Last Order Date, Amount Billed.
#[must_use]
pub fn credit_billing_schema() -> ReportSchema<CreditBilling> {
    ReportSchema::new("credit_billing", 1)
        .column(
            ColumnSpec::text("Clinic Name", |b: &CreditBilling| b.clinic_name.clone())
                .short("Clinic"),
        )
        .column(
            ColumnSpec::count("Credits Used", |b: &CreditBilling| b.credits_used).short("Credits"),
        )
        .column(
            ColumnSpec::count("Total Orders", |b: &CreditBilling| b.total_orders as u64)
                .short("Orders"),
        )
        .column(
            ColumnSpec::date("Last Order Date", |b: &CreditBilling| b.last_order_date)
                .short("Last Order"),
        )
        .column(
            ColumnSpec::money("Amount Billed", |b: &CreditBilling| b.amount_billed)
                .short("Amount"),
        )
}

/// Communications: per-channel messages and revenue per clinic.
#[must_use]
pub fn communications_schema() -> ReportSchema<CreditUsage> {
    ReportSchema::new("communications", 1)
        .column(
            ColumnSpec::text("Clinic Name", |u: &CreditUsage| u.clinic_name.clone())
                .short("Clinic"),
        )
        .column(
            ColumnSpec::count("WhatsApp Messages", |u: &CreditUsage| {
                u64::from(u.whatsapp_messages)
            })
            .short("WhatsApp"),
        )
        .column(
            ColumnSpec::count("Email Messages", |u: &CreditUsage| u64::from(u.email_messages))
                .short("Email"),
        )
        .column(
            ColumnSpec::money("WhatsApp Revenue", |u: &CreditUsage| u.whatsapp_revenue)
                .short("WA Revenue"),
        )
        .column(
            ColumnSpec::money("Email Revenue", |u: &CreditUsage| u.email_revenue)
                .short("Email Revenue"),
        )
        .column(ColumnSpec::money("Total Revenue", CreditUsage::total_revenue).short("Revenue"))
        .column(
            ColumnSpec::date("Last Order Date", |u: &CreditUsage| u.last_order_date)
                .short("Last Order"),
        )
}

/// Clinic summaries: Clinic Name, Last Order Date, Fulfillment Pharmacy, Status, Total Orders.
#[must_use]
pub fn clinic_summary_schema() -> ReportSchema<ClinicOrderSummary> {
    ReportSchema::new("clinic_summaries", 1)
        .column(
            ColumnSpec::text("Clinic Name", |s: &ClinicOrderSummary| s.clinic_name.clone())
                .short("Clinic"),
        )
        .column(
            ColumnSpec::date("Last Order Date", |s: &ClinicOrderSummary| s.last_order_date)
                .short("Last Order"),
        )
        .column(
            ColumnSpec::text("Fulfillment Pharmacy", |s: &ClinicOrderSummary| {
                s.fulfillment_pharmacy.clone()
            })
            .short("Pharmacy"),
        )
        .column(ColumnSpec::status("Status", |s: &ClinicOrderSummary| s.status))
        .column(
            ColumnSpec::count("Total Orders", |s: &ClinicOrderSummary| s.total_orders as u64)
                .short("Orders"),
        )
}

/// Clinic order details: Order ID, Date, Fulfillment Pharmacy, Status, Items, Amount.
#[must_use]
pub fn clinic_orders_schema() -> ReportSchema<Order> {
    ReportSchema::new("clinic_orders", 1)
        .column(ColumnSpec::text("Order ID", |o: &Order| o.order_number.clone()))
        .column(ColumnSpec::date("Date", |o: &Order| o.date))
        .column(
            ColumnSpec::text("Fulfillment Pharmacy", |o: &Order| o.fulfillment_pharmacy.clone())
                .short("Pharmacy"),
        )
        .column(ColumnSpec::status("Status", |o: &Order| o.status))
        .column(ColumnSpec::count("Items", |o: &Order| u64::from(o.items_count)))
        .column(ColumnSpec::money("Amount", |o: &Order| o.total_amount))
}
