// 📒 Session - current inputs, the entry list and the one-shot "added" flag
//
// State transitions:
//   set_total / set_rate  -> input changed, flag reset
//   append                -> pushes the current entry once, then sets the flag
//   clear                 -> empties the list, flag reset

use crate::aggregate::{aggregate, Aggregate};
use crate::calculator::{compute_reverse, Entry};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Initial "Number" input
pub const DEFAULT_TOTAL: f64 = 1000.0;

/// Initial "%" input
pub const DEFAULT_RATE: f64 = 10.0;

// ============================================================================
// APPEND OUTCOME
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "entry", rename_all = "snake_case")]
pub enum AppendOutcome {
    /// The current entry was pushed onto the list
    Appended(Entry),

    /// Inputs have not changed since the last append
    AlreadyAdded,

    /// The inputs produce no result; the flag is still set
    NothingToAppend,
}

impl AppendOutcome {
    pub fn is_appended(&self) -> bool {
        matches!(self, AppendOutcome::Appended(_))
    }
}

// ============================================================================
// SESSION
// ============================================================================

#[derive(Debug, Clone)]
pub struct Session {
    total: f64,
    rate: f64,
    entries: Vec<Entry>,
    added: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::with_inputs(DEFAULT_TOTAL, DEFAULT_RATE)
    }

    pub fn with_inputs(total: f64, rate: f64) -> Self {
        Session {
            total,
            rate,
            entries: Vec::new(),
            added: false,
        }
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Input-change event for the total
    pub fn set_total(&mut self, total: f64) {
        self.total = total;
        self.input_changed();
    }

    /// Input-change event for the rate
    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
        self.input_changed();
    }

    fn input_changed(&mut self) {
        if self.added {
            debug!(total = self.total, rate = self.rate, "inputs changed, append re-enabled");
        }
        self.added = false;
    }

    /// Result for the current inputs, if any
    pub fn current(&self) -> Option<Entry> {
        compute_reverse(self.total, self.rate)
    }

    pub fn can_append(&self) -> bool {
        !self.added
    }

    /// Append the current result once per input change
    pub fn append(&mut self) -> AppendOutcome {
        if self.added {
            debug!("append ignored, current result already added");
            return AppendOutcome::AlreadyAdded;
        }
        self.added = true;

        match self.current() {
            Some(entry) => {
                self.entries.push(entry);
                debug!(
                    base = entry.base,
                    rate = entry.rate,
                    amount = entry.amount,
                    count = self.entries.len(),
                    "entry appended"
                );
                AppendOutcome::Appended(entry)
            }
            None => {
                debug!(total = self.total, rate = self.rate, "nothing to append");
                AppendOutcome::NothingToAppend
            }
        }
    }

    /// Empty the list and re-enable appending
    pub fn clear(&mut self) {
        debug!(count = self.entries.len(), "entries cleared");
        self.entries.clear();
        self.added = false;
    }

    pub fn aggregate(&self) -> Option<Aggregate> {
        aggregate(&self.entries)
    }

    /// Snapshot for rendering or serialization
    pub fn view(&self) -> SessionView {
        SessionView {
            total: self.total,
            rate: self.rate,
            current: self.current(),
            entries: self.entries.clone(),
            aggregate: self.aggregate(),
            can_append: self.can_append(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the presentation layer shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub total: f64,
    pub rate: f64,
    pub current: Option<Entry>,
    pub entries: Vec<Entry>,
    pub aggregate: Option<Aggregate>,
    pub can_append: bool,
}

// ============================================================================
// INPUT COERCION
// ============================================================================

/// Turn raw input text into a number the way a numeric form field does.
///
/// Blank text is `0`, a decimal literal is its value, anything else is NaN.
/// Browser number coercion also reads `"Infinity"` and hex such as `"0x10"`;
/// both are NaN here.
pub fn coerce_input(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    // `str::parse::<f64>` also accepts "inf" and "nan"
    let is_literal = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if !is_literal {
        return f64::NAN;
    }

    trimmed.parse().unwrap_or(f64::NAN)
}

// ============================================================================
// TESTS
// ============================================================================
