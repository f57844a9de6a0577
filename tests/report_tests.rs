//! Tax-control-report aggregation tests.

#![cfg(feature = "report")]

use prevodnik::core::InvoiceItem;
use prevodnik::report::ControlReport;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn item(code: &str, unit: &str, vat: Decimal, quantity: Decimal, total: Decimal) -> InvoiceItem {
    InvoiceItem {
        code: code.into(),
        name: format!("tovar {code}"),
        unit: unit.into(),
        quantity,
        vat,
        total_no_vat: total,
        total,
        ..InvoiceItem::default()
    }
}

#[test]
fn reference_items_make_five_groups() {
    let items = vec![
        item("73141100", "ks", dec!(0), dec!(25), dec!(212.50)),
        item("73089090", "ks", dec!(0), dec!(60), dec!(150.00)),
        item("73141200", "bm", dec!(0), dec!(32), dec!(96.00)),
        item("72171010", "ks", dec!(0), dec!(12), dec!(100.20)),
        item("72172000", "kg", dec!(0), dec!(40), dec!(56.00)),
    ];
    let report = ControlReport::from_items(&items);

    let keys: Vec<(&str, &str)> = report
        .aggregates()
        .iter()
        .map(|a| (a.code.as_str(), a.unit.as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("7314", "ks"),
            ("7308", "ks"),
            ("7314", "bm"),
            ("7217", "ks"),
            ("7217", "kg"),
        ]
    );
    assert_eq!(report.total(), dec!(614.70));
}

#[test]
fn shared_prefix_and_unit_merge_into_one_group() {
    let items = vec![
        item("73141100", "ks", dec!(0), dec!(10), dec!(85.00)),
        item("73149999", "ks", dec!(0), dec!(5), dec!(42.50)),
    ];
    let report = ControlReport::from_items(&items);

    assert_eq!(report.aggregates().len(), 1);
    let group = &report.aggregates()[0];
    assert_eq!(group.code, "7314");
    assert_eq!(group.unit, "ks");
    assert_eq!(group.quantity, dec!(15));
    assert_eq!(group.total, dec!(127.50));
}

#[test]
fn same_prefix_with_different_unit_stays_separate() {
    let items = vec![
        item("73141100", "ks", dec!(0), dec!(10), dec!(85.00)),
        item("73141100", "bm", dec!(0), dec!(5), dec!(15.00)),
    ];
    let report = ControlReport::from_items(&items);
    assert_eq!(report.aggregates().len(), 2);
}

#[test]
fn taxed_and_uncoded_items_are_excluded() {
    let items = vec![
        item("73141100", "ks", dec!(0), dec!(10), dec!(85.00)),
        item("", "ks", dec!(0), dec!(3), dec!(30.00)),
        item("73141100", "ks", dec!(20), dec!(2), dec!(24.00)),
        item("73141100", "ks", dec!(10), dec!(1), dec!(11.00)),
    ];
    let report = ControlReport::from_items(&items);

    assert_eq!(report.aggregates().len(), 1);
    assert_eq!(report.total(), dec!(85.00));
}

#[test]
fn no_qualifying_items_is_a_valid_empty_report() {
    let items = vec![item("73141100", "ks", dec!(20), dec!(10), dec!(102.00))];
    let report = ControlReport::from_items(&items);

    assert!(report.is_empty());
    assert_eq!(report.aggregates().len(), 0);
    assert_eq!(report.total(), dec!(0));
}

#[test]
fn grand_total_equals_sum_of_qualifying_items() {
    let items = vec![
        item("73141100", "ks", dec!(0), dec!(1), dec!(10.50)),
        item("73089090", "ks", dec!(20), dec!(1), dec!(12.00)),
        item("72171010", "kg", dec!(0), dec!(2), dec!(7.25)),
        item("", "ks", dec!(0), dec!(1), dec!(99.00)),
    ];
    let report = ControlReport::from_items(&items);
    let expected: Decimal = items
        .iter()
        .filter(|i| !i.code.is_empty() && i.vat.is_zero())
        .map(|i| i.total)
        .sum();
    assert_eq!(report.total(), expected);
    assert_eq!(report.total(), dec!(17.75));
}
