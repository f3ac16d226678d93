//! Order aggregation service.

use std::collections::HashMap;

use clinicdash_shared::types::ClinicId;

use super::error::OrderError;
use super::filter::OrderFilter;
use super::types::{Clinic, ClinicOrderSummary, ClinicOrders, Order, OrderSummary};

/// Service for aggregating and querying orders.
pub struct OrderService;

impl OrderService {
    /// Sums amounts, credits and items across orders and counts them per status.
    ///
    /// An empty slice yields an all-zero summary.
    #[must_use]
    pub fn summarize_orders(orders: &[Order]) -> OrderSummary {
        orders
            .iter()
            .fold(OrderSummary::default(), |mut summary, order| {
                summary.count += 1;
                summary.total_amount += order.total_amount;
                summary.total_credits += u64::from(order.credits);
                summary.total_items += u64::from(order.items_count);
                *summary.count_by_status.entry(order.status).or_insert(0) += 1;
                summary
            })
    }

    /// Groups orders by clinic, keeping the latest order of each clinic as its
    /// representative.
    ///
    /// Output follows the first occurrence of each clinic in `orders`. When two
    /// orders share the latest date the earlier one in `orders` wins.
    #[must_use]
    pub fn rollup_by_clinic(orders: &[Order]) -> Vec<ClinicOrderSummary> {
        let mut summaries: Vec<ClinicOrderSummary> = Vec::new();
        let mut index: HashMap<&ClinicId, usize> = HashMap::new();

        for order in orders {
            if let Some(&slot) = index.get(&order.clinic_id) {
                let summary = &mut summaries[slot];
                summary.total_orders += 1;
                if order.date > summary.last_order_date {
                    summary.clinic_name.clone_from(&order.clinic_name);
                    summary.last_order_date = order.date;
                    summary
                        .fulfillment_pharmacy
                        .clone_from(&order.fulfillment_pharmacy);
                    summary.status = order.status;
                }
            } else {
                index.insert(&order.clinic_id, summaries.len());
                summaries.push(ClinicOrderSummary {
                    clinic_id: order.clinic_id.clone(),
                    clinic_name: order.clinic_name.clone(),
                    last_order_date: order.date,
                    fulfillment_pharmacy: order.fulfillment_pharmacy.clone(),
                    status: order.status,
                    total_orders: 1,
                });
            }
        }

        summaries
    }

    /// Returns the orders matching every criterion set on `filter`, in input order.
    #[must_use]
    pub fn filter_orders(orders: &[Order], filter: &OrderFilter) -> Vec<Order> {
        orders
            .iter()
            .filter(|order| filter.matches(order))
            .cloned()
            .collect()
    }

    /// Looks up a clinic and collects its orders.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::ClinicNotFound` if no clinic has the given ID.
    pub fn clinic_orders(
        clinic_id: &ClinicId,
        clinics: &[Clinic],
        orders: &[Order],
    ) -> Result<ClinicOrders, OrderError> {
        let clinic = clinics
            .iter()
            .find(|clinic| clinic.id == *clinic_id)
            .ok_or_else(|| OrderError::ClinicNotFound(clinic_id.clone()))?;

        Ok(ClinicOrders {
            clinic: clinic.clone(),
            orders: orders
                .iter()
                .filter(|order| order.clinic_id == *clinic_id)
                .cloned()
                .collect(),
        })
    }

    /// Resolves the display name for an order's clinic.
    ///
    /// Falls back to the name carried on the order when the clinic is unknown.
    #[must_use]
    pub fn clinic_name<'a>(order: &'a Order, clinics: &'a [Clinic]) -> &'a str {
        clinics
            .iter()
            .find(|clinic| clinic.id == order.clinic_id)
            .map_or(order.clinic_name.as_str(), |clinic| clinic.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::types::OrderStatus;
    use chrono::NaiveDate;
    use clinicdash_shared::types::OrderId;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn order(
        id: &str,
        clinic: &str,
        on: NaiveDate,
        status: OrderStatus,
        amount: Decimal,
        credits: u32,
    ) -> Order {
        Order {
            id: OrderId::new(id),
            order_number: format!("ORD-2024-{id}"),
            clinic_id: ClinicId::new(clinic),
            clinic_name: format!("Clinic {clinic}"),
            date: on,
            status,
            items_count: 0,
            total_amount: amount,
            credits,
            fulfillment_pharmacy: format!("Pharmacy {id}"),
        }
    }

    fn clinic(id: &str, name: &str) -> Clinic {
        Clinic {
            id: ClinicId::new(id),
            name: name.to_string(),
            location: "Downtown".to_string(),
            contact_person: "Dr. Test".to_string(),
            contact_email: "test@clinic.example".to_string(),
        }
    }

    #[test]
    fn test_summarize_two_orders_for_one_clinic() {
        let orders = vec![
            order("1", "c1", date(2024, 1, 1), OrderStatus::Completed, dec!(100), 10),
            order("2", "c1", date(2024, 1, 2), OrderStatus::Pending, dec!(50), 5),
        ];

        let summary = OrderService::summarize_orders(&orders);

        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_amount, dec!(150));
        assert_eq!(summary.total_credits, 15);
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.count_by_status.len(), 2);
        assert_eq!(summary.status_count(OrderStatus::Completed), 1);
        assert_eq!(summary.status_count(OrderStatus::Pending), 1);
        assert_eq!(summary.status_count(OrderStatus::Cancelled), 0);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = OrderService::summarize_orders(&[]);
        assert_eq!(summary, OrderSummary::default());
        assert_eq!(summary.total_amount, Decimal::ZERO);
        assert!(summary.count_by_status.is_empty());
    }

    #[test]
    fn test_rollup_picks_latest_order() {
        let orders = vec![
            order("1", "c1", date(2024, 1, 1), OrderStatus::Completed, dec!(100), 10),
            order("2", "c1", date(2024, 1, 20), OrderStatus::Pending, dec!(50), 5),
        ];

        let rollup = OrderService::rollup_by_clinic(&orders);

        assert_eq!(rollup.len(), 1);
        assert_eq!(rollup[0].last_order_date, date(2024, 1, 20));
        assert_eq!(rollup[0].total_orders, 2);
        assert_eq!(rollup[0].status, OrderStatus::Pending);
        assert_eq!(rollup[0].fulfillment_pharmacy, "Pharmacy 2");
    }

    #[test]
    fn test_rollup_tie_keeps_first_encountered() {
        let orders = vec![
            order("1", "c1", date(2024, 1, 5), OrderStatus::Processing, dec!(10), 1),
            order("2", "c1", date(2024, 1, 5), OrderStatus::Cancelled, dec!(20), 2),
        ];

        let rollup = OrderService::rollup_by_clinic(&orders);

        assert_eq!(rollup[0].status, OrderStatus::Processing);
        assert_eq!(rollup[0].fulfillment_pharmacy, "Pharmacy 1");
    }

    #[test]
    fn test_rollup_preserves_first_occurrence_order() {
        let orders = vec![
            order("1", "c2", date(2024, 1, 1), OrderStatus::Completed, dec!(1), 1),
            order("2", "c1", date(2024, 1, 9), OrderStatus::Completed, dec!(1), 1),
            order("3", "c2", date(2024, 1, 3), OrderStatus::Completed, dec!(1), 1),
            order("4", "c3", date(2024, 1, 2), OrderStatus::Completed, dec!(1), 1),
        ];

        let ids: Vec<_> = OrderService::rollup_by_clinic(&orders)
            .into_iter()
            .map(|s| (s.clinic_id.into_inner(), s.total_orders))
            .collect();

        assert_eq!(
            ids,
            vec![
                ("c2".to_string(), 2),
                ("c1".to_string(), 1),
                ("c3".to_string(), 1)
            ]
        );
    }

    #[rstest]
    #[case::by_order_number("ord-2024-2", &["2"])]
    #[case::by_clinic_name("CLINIC C1", &["1", "3"])]
    #[case::no_match("nothing", &[])]
    #[case::empty_term("", &["1", "2", "3"])]
    fn test_filter_by_search(#[case] term: &str, #[case] expected: &[&str]) {
        let orders = vec![
            order("1", "c1", date(2024, 1, 1), OrderStatus::Completed, dec!(1), 1),
            order("2", "c2", date(2024, 1, 2), OrderStatus::Pending, dec!(1), 1),
            order("3", "c1", date(2024, 1, 3), OrderStatus::Pending, dec!(1), 1),
        ];

        let filter = OrderFilter::new().with_search(term);
        let ids: Vec<_> = OrderService::filter_orders(&orders, &filter)
            .into_iter()
            .map(|o| o.id.into_inner())
            .collect();

        assert_eq!(ids, expected);
    }

    #[test]
    fn test_filter_combines_criteria() {
        let orders = vec![
            order("1", "c1", date(2024, 1, 1), OrderStatus::Completed, dec!(1), 1),
            order("2", "c1", date(2024, 1, 15), OrderStatus::Pending, dec!(1), 1),
            order("3", "c1", date(2024, 1, 20), OrderStatus::Completed, dec!(1), 1),
            order("4", "c2", date(2024, 1, 15), OrderStatus::Completed, dec!(1), 1),
        ];

        let filter = OrderFilter::new()
            .with_clinic(ClinicId::new("c1"))
            .with_status(OrderStatus::Completed)
            .with_date_range(date(2024, 1, 10), date(2024, 1, 20));

        let result = OrderService::filter_orders(&orders, &filter);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, OrderId::new("3"));
    }

    #[test]
    fn test_filter_inverted_range_matches_nothing() {
        let orders = vec![order(
            "1",
            "c1",
            date(2024, 1, 15),
            OrderStatus::Completed,
            dec!(1),
            1,
        )];

        let filter = OrderFilter::new().with_date_range(date(2024, 2, 1), date(2024, 1, 1));

        assert!(OrderService::filter_orders(&orders, &filter).is_empty());
    }

    #[test]
    fn test_empty_filter_is_empty() {
        assert!(OrderFilter::new().is_empty());
        assert!(OrderFilter::new().with_search("").is_empty());
        assert!(!OrderFilter::new().with_status(OrderStatus::Pending).is_empty());
    }

    #[test]
    fn test_clinic_orders_found() {
        let clinics = vec![clinic("c1", "Riverside"), clinic("c2", "Oakwood")];
        let orders = vec![
            order("1", "c1", date(2024, 1, 1), OrderStatus::Completed, dec!(1), 1),
            order("2", "c2", date(2024, 1, 2), OrderStatus::Pending, dec!(1), 1),
            order("3", "c1", date(2024, 1, 3), OrderStatus::Pending, dec!(1), 1),
        ];

        let detail = OrderService::clinic_orders(&ClinicId::new("c1"), &clinics, &orders).unwrap();

        assert_eq!(detail.clinic.name, "Riverside");
        assert_eq!(detail.orders.len(), 2);
        assert_eq!(detail.orders[0].id, OrderId::new("1"));
        assert_eq!(detail.orders[1].id, OrderId::new("3"));
    }

    #[test]
    fn test_clinic_orders_unknown_clinic() {
        let result = OrderService::clinic_orders(&ClinicId::new("c9"), &[], &[]);
        assert!(matches!(result, Err(OrderError::ClinicNotFound(id)) if id.as_str() == "c9"));
    }

    #[test]
    fn test_clinic_name_falls_back_to_denormalized_name() {
        let clinics = vec![clinic("c1", "Riverside Medical Center")];
        let known = order("1", "c1", date(2024, 1, 1), OrderStatus::Completed, dec!(1), 1);
        let unknown = order("2", "c7", date(2024, 1, 1), OrderStatus::Completed, dec!(1), 1);

        assert_eq!(
            OrderService::clinic_name(&known, &clinics),
            "Riverside Medical Center"
        );
        assert_eq!(OrderService::clinic_name(&unknown, &clinics), "Clinic c7");
    }

    #[test]
    fn test_status_from_str() {
        use std::str::FromStr;

        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert!(matches!(
            OrderStatus::from_str("shipped"),
            Err(OrderError::UnknownStatus(s)) if s == "shipped"
        ));
    }

    #[test]
    fn test_status_serde_rejects_unknown_value() {
        let parsed: Result<OrderStatus, _> = serde_json::from_str("\"refunded\"");
        assert!(parsed.is_err());

        let parsed: OrderStatus = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(parsed, OrderStatus::Processing);
    }
}
