//! FILENAME: core/table/src/number_format.rs
//! PURPOSE: Compact number formatting for axis ticks and chart labels.
//! CONTEXT: Values are shortened with k/M/B suffixes. Digits are truncated,
//! never rounded, so a label can never overstate the underlying magnitude.

/// A magnitude tier: threshold, divisor, suffix and decimals kept.
struct Unit {
    threshold: f64,
    suffix: &'static str,
    decimals: i32,
}

const UNITS: [Unit; 3] = [
    Unit { threshold: 1e9, suffix: "B", decimals: 3 },
    Unit { threshold: 1e6, suffix: "M", decimals: 3 },
    Unit { threshold: 1e3, suffix: "k", decimals: 1 },
];

const PLAIN_DECIMALS: i32 = 2;

/// Formats a number with a unit suffix and an optional prefix (currency etc).
///
/// The sign goes before the prefix: `format_large_number(-1_200_000.0, "₽ ")`
/// gives `"-₽ 1.2M"`.
pub fn format_large_number(value: f64, prefix: &str) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}0", prefix);
    }

    let magnitude = value.abs();
    let (scaled, suffix, decimals) = match UNITS.iter().find(|u| magnitude >= u.threshold) {
        Some(unit) => (magnitude / unit.threshold, unit.suffix, unit.decimals),
        None => (magnitude, "", PLAIN_DECIMALS),
    };

    let digits = trim_decimals(&format!(
        "{:.prec$}",
        truncate(scaled, decimals),
        prec = decimals as usize
    ));

    // A magnitude that truncates away entirely carries no sign
    let sign = if value < 0.0 && digits != "0" { "-" } else { "" };
    format!("{}{}{}{}", sign, prefix, digits, suffix)
}

/// Drops digits past `decimals` places, towards zero.
fn truncate(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).floor() / factor
}

/// Strips trailing zeros and a dangling decimal point.
fn trim_decimals(text: &str) -> String {
    if !text.contains('.') {
        return text.to_string();
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
