//! Money and percentage display helpers.
//!
//! Two-decimal text is produced from the exact binary value of the `f64`,
//! so `1.515` (stored as `1.51499…`) prints `1.51`. Only values that sit
//! exactly on a half cent, such as `0.125`, round away from zero.

/// Placeholder shown where a value is missing or not numeric.
pub const NO_DATA: &str = "—";

/// Two decimals from the exact value; exact half-cent ties round away from zero.
fn to_fixed2(value: f64) -> String {
    // An exact half cent is (2k + 1) / 200, which is only representable
    // when it is an odd multiple of 1/8. Scaling by 8 is exact.
    let eighths = value * 8.0;
    let is_tie = eighths.fract() == 0.0 && eighths.rem_euclid(2.0) == 1.0;
    if is_tie {
        format!("{:.2}", (value * 100.0).round() / 100.0)
    } else {
        format!("{value:.2}")
    }
}

/// Signed two-decimal money string: `+415.00`, `-65.00`, `+0.00`.
///
/// The sign follows the value itself, so `-0.001` prints `-0.00`. Only an
/// exact `-0.0` is treated as zero. Non-finite values render as [`NO_DATA`].
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return NO_DATA.to_string();
    }
    if value >= 0.0 {
        // `+ 0.0` turns -0.0 into 0.0
        format!("+{}", to_fixed2(value + 0.0))
    } else {
        to_fixed2(value)
    }
}

/// Money string for an optional average; `None` renders as [`NO_DATA`].
pub fn format_average(value: Option<f64>) -> String {
    value.map(format_money).unwrap_or_else(|| NO_DATA.to_string())
}

/// Percentage with up to two decimals, trailing zeros dropped: `66.67%`, `50%`.
pub fn format_percent(value: f64) -> String {
    let text = to_fixed2(value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text}%")
}
