//! Order filtering criteria.

use chrono::NaiveDate;
use clinicdash_shared::types::ClinicId;
use serde::{Deserialize, Serialize};

use super::types::{Order, OrderStatus};

/// Filter for order queries.
///
/// Every criterion is optional; an order matches when it satisfies all of the
/// criteria that are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilter {
    /// Case-insensitive substring of the order number or clinic name.
    pub search: Option<String>,
    /// Exact clinic.
    pub clinic_id: Option<ClinicId>,
    /// Exact status.
    pub status: Option<OrderStatus>,
    /// Earliest order date, inclusive.
    pub date_from: Option<NaiveDate>,
    /// Latest order date, inclusive.
    pub date_to: Option<NaiveDate>,
}

impl OrderFilter {
    /// Creates a new empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text search term. An empty term clears it.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.is_empty() { None } else { Some(term) };
        self
    }

    /// Restricts to a single clinic.
    #[must_use]
    pub fn with_clinic(mut self, clinic_id: ClinicId) -> Self {
        self.clinic_id = Some(clinic_id);
        self
    }

    /// Restricts to a single status.
    #[must_use]
    pub const fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to orders dated within `from..=to`.
    #[must_use]
    pub const fn with_date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    /// Returns true if the filter is empty (matches everything).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().is_none_or(str::is_empty)
            && self.clinic_id.is_none()
            && self.status.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    /// Returns true if the order satisfies every criterion that is set.
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        self.matches_search(order)
            && self.clinic_id.as_ref().is_none_or(|id| *id == order.clinic_id)
            && self.status.is_none_or(|status| status == order.status)
            && self.date_from.is_none_or(|from| order.date >= from)
            && self.date_to.is_none_or(|to| order.date <= to)
    }

    fn matches_search(&self, order: &Order) -> bool {
        match self.search.as_deref() {
            None | Some("") => true,
            Some(term) => {
                let needle = term.to_lowercase();
                order.order_number.to_lowercase().contains(&needle)
                    || order.clinic_name.to_lowercase().contains(&needle)
            }
        }
    }
}
