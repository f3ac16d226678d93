//! Clinicdash Reporter
//!
//! Builds every report from the configured data source and writes one
//! artifact per configured format.

use anyhow::Context;
use chrono::Local;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinicdash_core::DataSource;
use clinicdash_core::billing::BillingService;
use clinicdash_core::dashboard::DashboardService;
use clinicdash_core::orders::OrderService;
use clinicdash_core::reports::{Report, ReportContext, ReportService};
use clinicdash_export::Exporter;
use clinicdash_fixtures::FixtureSource;
use clinicdash_shared::{AppConfig, AppError};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clinicdash=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    info!(
        currency = %config.reporting.currency,
        balance_ratio = %config.reporting.balance_ratio,
        output_dir = %config.export.output_dir.display(),
        "Configuration loaded"
    );

    let source = FixtureSource::load(config.data.fixture_path.as_deref())
        .map_err(AppError::from)
        .context("Failed to load data source")?;
    info!(
        clinics = source.clinics().len(),
        orders = source.orders().len(),
        "Data source ready"
    );

    let now = Local::now().naive_local();
    log_dashboard(&source, now.date());

    let exporter = Exporter::from_config(&config.export);
    let mut written = 0usize;

    for &format in &config.export.formats {
        let ctx = ReportContext::from_config(&config.reporting, format.into(), now);

        for report in build_reports(&source, &ctx) {
            let path = exporter
                .export(&report, format, None)
                .map_err(AppError::from)
                .with_context(|| format!("Failed to export {}", report.kind))?;
            info!(path = %path.display(), "Exported");
            written += 1;
        }
    }

    if written == 0 {
        warn!("No export formats configured; nothing written");
    }
    info!(
        artifacts = written,
        dir = %exporter.output_dir().display(),
        "Export finished"
    );

    Ok(())
}

/// Builds the full report set, including one detail report per clinic.
fn build_reports(source: &impl DataSource, ctx: &ReportContext) -> Vec<Report> {
    let orders = source.orders();
    let billing = BillingService::credit_billing_by_clinic(orders);
    let summaries = OrderService::rollup_by_clinic(orders);

    let mut reports = vec![
        ReportService::orders_report(orders, ctx),
        ReportService::credit_billing_report(&billing, ctx),
        ReportService::communications_report(source.credit_usage(), ctx),
        ReportService::clinic_summaries_report(&summaries, ctx),
    ];

    for clinic in source.clinics() {
        match OrderService::clinic_orders(&clinic.id, source.clinics(), orders) {
            Ok(detail) => reports.push(ReportService::clinic_orders_report(&detail, ctx)),
            Err(err) => warn!(clinic = %clinic.id, error = %err, "Skipping clinic"),
        }
    }

    reports
}

fn log_dashboard(source: &impl DataSource, today: chrono::NaiveDate) {
    let orders = DashboardService::order_metrics(source.orders(), today);
    let billing = DashboardService::billing_metrics(&BillingService::credit_billing_by_clinic(
        source.orders(),
    ));

    info!(
        orders_today = orders.orders_today,
        orders_this_month = orders.orders_this_month,
        completed = orders.completed_orders,
        pending = orders.pending_orders,
        "Order metrics"
    );
    info!(
        total_credits = billing.total_credits,
        amount_billed = %billing.total_amount_billed,
        active_clinics = billing.active_clinics,
        average_credits = %billing.average_credits_per_clinic,
        "Billing metrics"
    );
}
