// 🧮 Reverse Percentage Calculator
//
// Given a total that already includes a percentage addition, recover the base
// value and the amount the percentage contributed:
//
//   base   = total * 100 / (rate + 100)
//   amount = base * rate / 100

use crate::rounding::round_money;
use serde::{Deserialize, Serialize};

// ============================================================================
// ENTRY
// ============================================================================

/// One computed result. Entries are never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Value before the percentage was applied
    pub base: f64,

    /// Percentage rate (10 means 10%)
    pub rate: f64,

    /// Absolute contribution of the percentage
    pub amount: f64,
}

impl Entry {
    /// Base plus amount, unrounded (the per-row "total" column)
    pub fn total(&self) -> f64 {
        self.base + self.amount
    }
}

// ============================================================================
// CALCULATION
// ============================================================================

/// Derive the base value and percentage amount from a percentage-adjusted total.
///
/// Returns `None` when either input is zero or NaN: nothing to compute yet.
///
/// ```
/// use revpct::compute_reverse;
///
/// let entry = compute_reverse(1000.0, 10.0).unwrap();
/// assert_eq!(entry.base, 909.09);
/// assert_eq!(entry.amount, 90.91);
///
/// assert!(compute_reverse(1000.0, 0.0).is_none());
/// ```
pub fn compute_reverse(total: f64, rate: f64) -> Option<Entry> {
    if is_blank(total) || is_blank(rate) {
        return None;
    }

    let base = round_money(total * 100.0 / (rate + 100.0));
    let amount = round_money(base * rate / 100.0);

    Some(Entry { base, rate, amount })
}

/// Zero and NaN count as "no input"
fn is_blank(value: f64) -> bool {
    value == 0.0 || value.is_nan()
}

// ============================================================================
// TESTS
// ============================================================================
