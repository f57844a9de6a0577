//! Tax-control-report (kontrolný výkaz) aggregation.
//!
//! Reverse-charge goods are reported grouped by the first four characters of
//! the combined-nomenclature code and the unit. Only zero-VAT items with a
//! code participate; everything else belongs to the ordinary VAT summary and
//! never shows up here.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Invoice, InvoiceItem};

/// One control-report group: items sharing a code prefix and unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAggregate {
    /// First four characters of the commodity code.
    pub code: String,
    pub unit: String,
    pub quantity: Decimal,
    pub total: Decimal,
}

/// Aggregated reverse-charge lines of one invoice.
///
/// An invoice with no qualifying items aggregates to zero groups; that is a
/// valid outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlReport {
    aggregates: Vec<ItemAggregate>,
}

impl ControlReport {
    pub fn new(invoice: &Invoice) -> Self {
        Self::from_items(&invoice.items)
    }

    /// Group zero-VAT coded items by `(code prefix, unit)`, summing quantity
    /// and total per group.
    pub fn from_items(items: &[InvoiceItem]) -> Self {
        // Groups live in the Vec in first-seen order; the map only remembers
        // positions. Hash-map iteration order never reaches the output.
        let mut aggregates: Vec<ItemAggregate> = Vec::new();
        let mut index: HashMap<(String, String), usize> = HashMap::new();
        for item in items {
            if item.code.is_empty() || !item.vat.is_zero() {
                continue;
            }
            let prefix: String = item.code.chars().take(4).collect();
            let key = (prefix.clone(), item.unit.clone());
            let at = *index.entry(key).or_insert_with(|| {
                aggregates.push(ItemAggregate {
                    code: prefix,
                    unit: item.unit.clone(),
                    quantity: Decimal::ZERO,
                    total: Decimal::ZERO,
                });
                aggregates.len() - 1
            });
            aggregates[at].quantity += item.quantity;
            aggregates[at].total += item.total;
        }
        Self { aggregates }
    }

    /// Groups in first-seen order.
    pub fn aggregates(&self) -> &[ItemAggregate] {
        &self.aggregates
    }

    pub fn is_empty(&self) -> bool {
        self.aggregates.is_empty()
    }

    /// Grand total across all groups.
    pub fn total(&self) -> Decimal {
        self.aggregates.iter().map(|aggregate| aggregate.total).sum()
    }
}
