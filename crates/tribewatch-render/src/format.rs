//! Fixed-point number formatting for the view.
//!
//! Every numeric stat in the view is shown with a fixed number of
//! fractional digits regardless of the precision it arrived with, so
//! `3` renders as `3.0` and `0.5` as `0.50` at two digits.

/// Format `value` with exactly `digits` fractional digits.
pub fn fixed(value: f64, digits: usize) -> String {
    format!("{value:.digits$}")
}

/// One fractional digit (resources, weather multiplier).
pub fn one_dp(value: f64) -> String {
    fixed(value, 1)
}

/// Two fractional digits (knowledge, agent needs).
pub fn two_dp(value: f64) -> String {
    fixed(value, 2)
}

/// Two fractional digits with an explicit sign (attitudes).
pub fn signed_two_dp(value: f64) -> String {
    format!("{value:+.2}")
}
