//! Property-based tests for the control-report aggregation.
//!
//! Run with: `cargo test --test proptest_tests`

#![cfg(feature = "report")]

use proptest::collection::vec;
use proptest::prelude::*;
use prevodnik::core::InvoiceItem;
use prevodnik::report::ControlReport;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn arb_code() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("73141100".to_string()),
        Just("73089090".to_string()),
        Just("72171010".to_string()),
        "[0-9]{8}",
    ]
}

fn arb_unit() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("ks"), Just("bm"), Just("kg")]
}

fn arb_vat() -> impl Strategy<Value = Decimal> {
    prop_oneof![Just(dec!(0)), Just(dec!(10)), Just(dec!(20))]
}

fn arb_item() -> impl Strategy<Value = InvoiceItem> {
    (
        arb_code(),
        arb_unit(),
        arb_vat(),
        1u32..100_000,
        1u32..10_000_000,
    )
        .prop_map(|(code, unit, vat, quantity_cents, total_cents)| InvoiceItem {
            code,
            name: "tovar".into(),
            unit: unit.into(),
            quantity: Decimal::new(i64::from(quantity_cents), 2),
            vat,
            total_no_vat: Decimal::new(i64::from(total_cents), 2),
            total: Decimal::new(i64::from(total_cents), 2),
            ..InvoiceItem::default()
        })
}

fn qualifies(item: &InvoiceItem) -> bool {
    !item.code.is_empty() && item.vat.is_zero()
}

fn prefix(item: &InvoiceItem) -> String {
    item.code.chars().take(4).collect()
}

proptest! {
    /// The grand total always equals the sum over zero-VAT coded items.
    #[test]
    fn grand_total_matches_the_filter(items in vec(arb_item(), 0..40)) {
        let report = ControlReport::from_items(&items);
        let expected: Decimal = items.iter().filter(|i| qualifies(i)).map(|i| i.total).sum();
        prop_assert_eq!(report.total(), expected);
    }

    /// Groups come out in first-seen key order, with no duplicate keys.
    #[test]
    fn groups_follow_first_seen_order(items in vec(arb_item(), 0..40)) {
        let report = ControlReport::from_items(&items);

        let mut expected: Vec<(String, String)> = Vec::new();
        for item in items.iter().filter(|i| qualifies(i)) {
            let key = (prefix(item), item.unit.clone());
            if !expected.contains(&key) {
                expected.push(key);
            }
        }
        let actual: Vec<(String, String)> = report
            .aggregates()
            .iter()
            .map(|a| (a.code.clone(), a.unit.clone()))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    /// Per-group quantity and total sums match a straight filter.
    #[test]
    fn per_group_sums_match(items in vec(arb_item(), 0..40)) {
        let report = ControlReport::from_items(&items);
        for aggregate in report.aggregates() {
            let members: Vec<&InvoiceItem> = items
                .iter()
                .filter(|i| qualifies(i) && prefix(i) == aggregate.code && i.unit == aggregate.unit)
                .collect();
            let quantity: Decimal = members.iter().map(|i| i.quantity).sum();
            let total: Decimal = members.iter().map(|i| i.total).sum();
            prop_assert_eq!(aggregate.quantity, quantity);
            prop_assert_eq!(aggregate.total, total);
        }
    }

    /// Aggregation never invents a group: every key traces back to an item.
    #[test]
    fn every_group_has_a_source_item(items in vec(arb_item(), 0..40)) {
        let report = ControlReport::from_items(&items);
        for aggregate in report.aggregates() {
            prop_assert!(items.iter().any(|i|
                qualifies(i) && prefix(i) == aggregate.code && i.unit == aggregate.unit
            ));
        }
    }
}
