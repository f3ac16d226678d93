//! Data source abstraction.
//!
//! Reports are built from read-only snapshots. Implementations materialize
//! their records once and hand out borrowed slices.

use clinicdash_shared::types::ClinicId;

use crate::billing::CreditUsage;
use crate::orders::{Clinic, Order};

/// Read-only provider of the dashboard's records.
pub trait DataSource {
    /// All clinics.
    fn clinics(&self) -> &[Clinic];

    /// All orders in source order.
    fn orders(&self) -> &[Order];

    /// Communications usage, one record per clinic.
    fn credit_usage(&self) -> &[CreditUsage];

    /// Looks up a clinic by ID.
    fn clinic(&self, id: &ClinicId) -> Option<&Clinic> {
        self.clinics().iter().find(|clinic| clinic.id == *id)
    }
}
