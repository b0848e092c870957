//! Number formatting for the dashboard.
//!
//! Prices are shown in Indian rupees with en-IN digit grouping (`₹1,23,456.78`),
//! volumes with en-US grouping (`8,432,117`) and market caps in compact en-US
//! notation (`16.7T`).

/// Compact notation suffixes, smallest first.
const COMPACT_UNITS: [(f64, &str); 5] = [
    (1.0, ""),
    (1e3, "K"),
    (1e6, "M"),
    (1e9, "B"),
    (1e12, "T"),
];

/// Percent change from `previous` to `current`, rounded to 2 decimals.
///
/// A zero `previous` has no meaningful change and yields `0.0`.
pub fn calculate_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    round_to((current - previous) / previous * 100.0, 2)
}

/// Format a count or amount with en-US grouping.
///
/// Plain form keeps up to 3 fraction digits. With `compact` the value is scaled to
/// K/M/B/T with at most 1 fraction digit.
pub fn format_number(num: f64, compact: bool) -> String {
    if !num.is_finite() {
        return num.to_string();
    }
    if compact {
        return format_compact(num);
    }
    let rounded = round_to(num, 3);
    with_sign(rounded, group_thousands(&trim_fraction(rounded.abs(), 3)))
}

/// Format a rupee amount, always with 2 fraction digits and en-IN grouping.
pub fn format_currency(num: f64) -> String {
    if !num.is_finite() {
        return format!("₹{}", num);
    }
    let paise = (num.abs() * 100.0).round() as u64;
    let body = format!("₹{}.{:02}", group_indian(paise / 100), paise % 100);
    if num < 0.0 && paise > 0 {
        format!("-{}", body)
    } else {
        body
    }
}

fn format_compact(num: f64) -> String {
    let abs = num.abs();
    let mut unit = COMPACT_UNITS
        .iter()
        .rposition(|(divisor, _)| abs >= *divisor)
        .unwrap_or(0);
    let mut scaled = round_to(abs / COMPACT_UNITS[unit].0, 1);
    // 999_990 rounds to 1000K, which reads as 1M
    if scaled >= 1000.0 && unit + 1 < COMPACT_UNITS.len() {
        unit += 1;
        scaled = round_to(abs / COMPACT_UNITS[unit].0, 1);
    }
    let digits = group_thousands(&trim_fraction(scaled, 1));
    let signed = if num < 0.0 { -scaled } else { scaled };
    with_sign(signed, format!("{}{}", digits, COMPACT_UNITS[unit].1))
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn with_sign(value: f64, body: String) -> String {
    if value < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// `1234.500` -> `1234.5`, `12.000` -> `12`.
fn trim_fraction(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Insert a comma every 3 digits of the integer part.
fn group_thousands(text: &str) -> String {
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text, None),
    };
    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

/// Indian grouping: last 3 digits, then pairs (`12,34,567`).
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.push(',');
    grouped.push_str(tail);
    grouped
}
