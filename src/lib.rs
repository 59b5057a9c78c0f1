// Reverse Percentage Calculator - Core Library
// Exposes all modules for use in the TUI, the API server, and tests

pub mod aggregate;
pub mod calculator;
pub mod config;
pub mod logger;
pub mod rounding;
pub mod session;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use aggregate::{aggregate, Aggregate};
pub use calculator::{compute_reverse, Entry};
pub use config::Config;
pub use rounding::{round, round_money, DECIMAL_DIGITS, STEP};
pub use session::{coerce_input, AppendOutcome, Session, SessionView, DEFAULT_RATE, DEFAULT_TOTAL};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
