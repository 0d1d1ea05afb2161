//! Formatting utilities used for CLI, report and export outputs.

/// Hours with two decimals, e.g. `7.50`.
pub fn format_hours(hours: f64) -> String {
    format!("{:.2}", hours)
}

/// Euro amount with two decimals, e.g. `€112.50`.
pub fn format_euro(amount: f64) -> String {
    format!("€{:.2}", amount)
}

/// Optional hourly rate for list outputs; unset rates render as `--`.
pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format_euro(r),
        None => "--".to_string(),
    }
}
