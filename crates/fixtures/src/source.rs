//! JSON-backed data source.

use std::collections::HashSet;
use std::path::Path;

use clinicdash_core::DataSource;
use clinicdash_core::billing::CreditUsage;
use clinicdash_core::orders::{Clinic, Order, OrderService};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::SourceError;

const BUNDLED: &str = include_str!("../data/fixtures.json");

/// Immutable snapshot of fixture records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FixtureSource {
    #[serde(default)]
    clinics: Vec<Clinic>,
    #[serde(default)]
    orders: Vec<Order>,
    #[serde(default)]
    credit_usage: Vec<CreditUsage>,
}

impl FixtureSource {
    /// Loads the bundled fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled JSON is invalid.
    pub fn bundled() -> Result<Self, SourceError> {
        Self::from_json(BUNDLED)
    }

    /// Loads a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let json = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Loads the configured fixture file, or the bundled fixture if unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture cannot be loaded.
    pub fn load(path: Option<&Path>) -> Result<Self, SourceError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::bundled(),
        }
    }

    /// Parses fixture JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    ///
    /// Records whose clinic is not listed are kept; reports fall back to the
    /// clinic name carried on the record.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let source: Self = serde_json::from_str(json)?;
        let dangling = source.warn_dangling_references();

        debug!(
            clinics = source.clinics.len(),
            orders = source.orders.len(),
            credit_usage = source.credit_usage.len(),
            dangling,
            "Loaded fixture"
        );
        Ok(source)
    }

    /// Logs every record whose clinic is not listed and returns their count.
    fn warn_dangling_references(&self) -> usize {
        let known: HashSet<_> = self.clinics.iter().map(|c| &c.id).collect();
        let mut dangling = 0;

        for order in self.orders.iter().filter(|o| !known.contains(&o.clinic_id)) {
            warn!(
                order = %order.id,
                clinic_id = %order.clinic_id,
                clinic_name = OrderService::clinic_name(order, &self.clinics),
                "Order references unknown clinic"
            );
            dangling += 1;
        }
        for usage in self
            .credit_usage
            .iter()
            .filter(|u| !known.contains(&u.clinic_id))
        {
            warn!(
                clinic_id = %usage.clinic_id,
                clinic_name = %usage.clinic_name,
                "Credit usage references unknown clinic"
            );
            dangling += 1;
        }

        dangling
    }
}

impl DataSource for FixtureSource {
    fn clinics(&self) -> &[Clinic] {
        &self.clinics
    }

    fn orders(&self) -> &[Order] {
        &self.orders
    }

    fn credit_usage(&self) -> &[CreditUsage] {
        &self.credit_usage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clinicdash_core::orders::OrderStatus;
    use clinicdash_shared::types::ClinicId;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bundled_fixture_loads() {
        let source = FixtureSource::bundled().unwrap();

        assert_eq!(source.clinics().len(), 4);
        assert_eq!(source.orders().len(), 9);
        assert_eq!(source.credit_usage().len(), 4);
    }

    #[test]
    fn test_bundled_first_order() {
        let source = FixtureSource::bundled().unwrap();
        let order = &source.orders()[0];

        assert_eq!(order.order_number, "ORD-2024-001");
        assert_eq!(order.clinic_name, "Riverside Medical Center");
        assert_eq!(order.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.total_amount, dec!(3250));
        assert_eq!(order.credits, 65);
    }

    #[test]
    fn test_clinic_lookup() {
        let source = FixtureSource::bundled().unwrap();

        let clinic = source.clinic(&ClinicId::from("c3")).unwrap();
        assert_eq!(clinic.name, "Greenfield Health Center");
        assert!(source.clinic(&ClinicId::from("c9")).is_none());
    }

    #[test]
    fn test_empty_object_is_empty_source() {
        let source = FixtureSource::from_json("{}").unwrap();

        assert!(source.orders().is_empty());
        assert!(source.clinics().is_empty());
    }

    #[test]
    fn test_unknown_status_rejected() {
        let json = r#"{"orders": [{
            "id": "o1", "order_number": "ORD-1", "clinic_id": "c1",
            "clinic_name": "A", "date": "2024-01-15", "status": "shipped",
            "items_count": 1, "total_amount": "10.00", "credits": 1,
            "fulfillment_pharmacy": "P"
        }]}"#;

        assert!(matches!(
            FixtureSource::from_json(json),
            Err(SourceError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_clinic_keeps_record() {
        let json = r#"{"clinics": [], "orders": [{
            "id": "o1", "order_number": "ORD-1", "clinic_id": "c9",
            "clinic_name": "Lakeside Clinic", "date": "2024-01-15", "status": "pending",
            "items_count": 1, "total_amount": "10.00", "credits": 1,
            "fulfillment_pharmacy": "P"
        }]}"#;

        let source = FixtureSource::from_json(json).unwrap();

        assert_eq!(source.orders().len(), 1);
        let order = &source.orders()[0];
        assert_eq!(order.clinic_id, ClinicId::from("c9"));
        assert_eq!(
            OrderService::clinic_name(order, source.clinics()),
            "Lakeside Clinic"
        );
        assert_eq!(source.warn_dangling_references(), 1);
    }

    #[test]
    fn test_bundled_fixture_has_no_dangling_references() {
        assert_eq!(FixtureSource::bundled().unwrap().warn_dangling_references(), 0);
    }

    #[test]
    fn test_missing_file() {
        let err = FixtureSource::from_path(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
