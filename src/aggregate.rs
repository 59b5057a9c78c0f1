// ∑ Aggregator - running sums over the entry list
//
// Each accumulation step is rounded, not just the final sums. The results
// therefore depend on intermediate rounding, and existing totals must keep
// matching, so the per-step rounding stays.

use crate::calculator::Entry;
use crate::rounding::round_money;
use serde::{Deserialize, Serialize};

/// Sums over all entries. Always derived, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub base_total: f64,
    pub amount_total: f64,
    pub grand_total: f64,
}

/// Fold the entries left to right, rounding after every step.
///
/// Returns `None` for an empty list.
///
/// ```
/// use revpct::{aggregate, Entry};
///
/// let entries = [Entry { base: 900.0, rate: 10.0, amount: 90.0 }];
/// let sums = aggregate(&entries).unwrap();
/// assert_eq!(sums.grand_total, 990.0);
///
/// assert!(aggregate(&[]).is_none());
/// ```
pub fn aggregate(entries: &[Entry]) -> Option<Aggregate> {
    if entries.is_empty() {
        return None;
    }

    let sums = entries.iter().fold(Aggregate::default(), |acc, entry| Aggregate {
        base_total: round_money(acc.base_total + entry.base),
        grand_total: round_money(acc.grand_total + entry.base + entry.amount),
        amount_total: round_money(acc.amount_total + entry.amount),
    });

    Some(sums)
}

// ============================================================================
// TESTS
// ============================================================================
