//! Formatting of dollar amounts for display text.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// Format `number` as a dollar amount rounded to the nearest whole dollar with
/// thousands separators, e.g. `$2,700`.
///
/// Halves are rounded to even, so `2.5` is shown as `$2`.
pub fn format_currency_rounded(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .ok()
            .map(|formatter| formatter.precision(Precision::Decimals(0)))
    });

    static NEGATIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .ok()
            .map(|formatter| formatter.precision(Precision::Decimals(0)))
    });

    let number = number.round_ties_even();

    match (positive_fmt, negative_fmt) {
        (Some(positive_fmt), _) if number > 0.0 => positive_fmt.fmt_string(number),
        (_, Some(negative_fmt)) if number < 0.0 => negative_fmt.fmt_string(number.abs()),
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        _ if number == 0.0 => "$0".to_owned(),
        _ => format!("${number:.0}"),
    }
}
