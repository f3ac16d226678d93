//! Report generation service.

use chrono::NaiveDateTime;
use clinicdash_shared::config::ReportingConfig;
use clinicdash_shared::types::Currency;
use rust_decimal::Decimal;

use super::format::CellFormatter;
use super::kinds::{self, ReportKind};
use super::types::{Report, SummaryLine, Table, Target};
use crate::billing::{BillingService, CreditBilling, CreditUsage};
use crate::orders::{ClinicOrderSummary, ClinicOrders, Order};

/// Parameters shared by every report of one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    /// Presentation the cells are formatted for.
    pub target: Target,
    /// Currency for monetary cells.
    pub currency: Currency,
    /// Share of payable/revenue amounts reported as balance.
    pub balance_ratio: Decimal,
    /// Generation timestamp printed on documents.
    pub generated_at: NaiveDateTime,
}

impl ReportContext {
    /// Creates a context with the default reporting configuration.
    #[must_use]
    pub fn new(target: Target, generated_at: NaiveDateTime) -> Self {
        Self::from_config(&ReportingConfig::default(), target, generated_at)
    }

    /// Creates a context from reporting configuration.
    #[must_use]
    pub fn from_config(
        config: &ReportingConfig,
        target: Target,
        generated_at: NaiveDateTime,
    ) -> Self {
        Self {
            target,
            currency: config.currency,
            balance_ratio: config.balance_ratio,
            generated_at,
        }
    }

    /// Returns a copy targeting a different presentation.
    #[must_use]
    pub fn for_target(&self, target: Target) -> Self {
        Self {
            target,
            ..self.clone()
        }
    }

    fn formatter(&self) -> CellFormatter {
        CellFormatter::new(self.target, self.currency)
    }
}

/// Service for building reports from domain records.
pub struct ReportService;

impl ReportService {
    /// Builds the orders report with a settlement summary.
    #[must_use]
    pub fn orders_report(orders: &[Order], ctx: &ReportContext) -> Report {
        let formatter = ctx.formatter();
        let settlement = BillingService::settlement(orders, ctx.balance_ratio);

        let summary = vec![
            SummaryLine::new("Total Orders", formatter.count(settlement.total_orders as u64)),
            SummaryLine::new(
                "Total Credits Used",
                formatter.count(settlement.total_credits),
            ),
            SummaryLine::new("Payable Amount", formatter.money(settlement.payable_amount)),
            SummaryLine::new("Balance", formatter.money(settlement.balance)),
        ];

        let table =
            kinds::orders_schema().render(orders, &formatter, ReportKind::Orders.has_totals());
        Self::assemble(ReportKind::Orders, ctx, summary, table)
    }

    /// Builds the credit billing report.
    #[must_use]
    pub fn credit_billing_report(billing: &[CreditBilling], ctx: &ReportContext) -> Report {
        let formatter = ctx.formatter();
        let total_credits: u64 = billing.iter().map(|b| b.credits_used).sum();
        let total_amount: Decimal = billing.iter().map(|b| b.amount_billed).sum();

        let summary = vec![
            SummaryLine::new("Total Credits Consumed", formatter.count(total_credits)),
            SummaryLine::new("Total Amount", formatter.money(total_amount)),
        ];

        let table = kinds::credit_billing_schema().render(
            billing,
            &formatter,
            ReportKind::CreditBilling.has_totals(),
        );
        Self::assemble(ReportKind::CreditBilling, ctx, summary, table)
    }

    /// Builds the communications usage report.
    #[must_use]
    pub fn communications_report(usages: &[CreditUsage], ctx: &ReportContext) -> Report {
        let formatter = ctx.formatter();
        let totals = BillingService::summarize_credit_usage(usages);
        let balance = BillingService::balance(totals.total_revenue, ctx.balance_ratio);

        let summary = vec![
            SummaryLine::new(
                "Total WhatsApp Messages",
                formatter.count(totals.total_whatsapp),
            ),
            SummaryLine::new("Total Email Messages", formatter.count(totals.total_email)),
            SummaryLine::new("Total Revenue", formatter.money(totals.total_revenue)),
            SummaryLine::new(
                "Avg Messages/Clinic",
                format!("{:.2}", totals.average_per_clinic),
            ),
            SummaryLine::new("Balance", formatter.money(balance)),
        ];

        let table = kinds::communications_schema().render(
            usages,
            &formatter,
            ReportKind::Communications.has_totals(),
        );
        Self::assemble(ReportKind::Communications, ctx, summary, table)
    }

    /// Builds the clinic summaries report.
    #[must_use]
    pub fn clinic_summaries_report(
        summaries: &[ClinicOrderSummary],
        ctx: &ReportContext,
    ) -> Report {
        let formatter = ctx.formatter();
        let total_orders: usize = summaries.iter().map(|s| s.total_orders).sum();

        let summary = vec![
            SummaryLine::new("Clinics", formatter.count(summaries.len() as u64)),
            SummaryLine::new("Total Orders", formatter.count(total_orders as u64)),
        ];

        let table = kinds::clinic_summary_schema().render(
            summaries,
            &formatter,
            ReportKind::ClinicSummaries.has_totals(),
        );
        Self::assemble(ReportKind::ClinicSummaries, ctx, summary, table)
    }

    /// Builds the order details report for one clinic.
    ///
    /// The title carries the clinic name and the file name the clinic ID.
    #[must_use]
    pub fn clinic_orders_report(detail: &ClinicOrders, ctx: &ReportContext) -> Report {
        let formatter = ctx.formatter();
        let clinic = &detail.clinic;

        let summary = vec![
            SummaryLine::new("Location", clinic.location.clone()),
            SummaryLine::new("Contact", clinic.contact_person.clone()),
            SummaryLine::new("Email", clinic.contact_email.clone()),
            SummaryLine::new("Orders", formatter.count(detail.orders.len() as u64)),
        ];

        let table = kinds::clinic_orders_schema().render(
            &detail.orders,
            &formatter,
            ReportKind::ClinicOrders.has_totals(),
        );

        let mut report = Self::assemble(ReportKind::ClinicOrders, ctx, summary, table);
        report.title = format!("{} Orders", clinic.name);
        report.file_stem = format!("clinic_{}_orders", clinic.id);
        report
    }

    fn assemble(
        kind: ReportKind,
        ctx: &ReportContext,
        summary: Vec<SummaryLine>,
        table: Table,
    ) -> Report {
        Report {
            kind,
            target: ctx.target,
            title: kind.title().to_string(),
            sheet_name: kind.sheet_name().to_string(),
            file_stem: kind.file_stem().to_string(),
            generated_at: ctx.generated_at,
            summary,
            table,
        }
    }
}
