//! XML renderers for the downstream trading system.

pub mod baskets;
pub mod instruments;

/// Format a derived value the way downstream ingestion expects: fixed
/// four decimal places.
pub fn format_ratio(value: f64) -> String {
    format!("{value:.4}")
}
