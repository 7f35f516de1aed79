//! Currency formatting for prices shown in rankings and statistics.
//!
//! Prices are stored as plain decimals in PLN and rendered in the Polish
//! locale: comma decimal separator, two fraction digits, non-breaking space
//! grouping for amounts of five or more integer digits, ` zł` suffix.

/// Placeholder shown instead of a price when the price is unknown.
pub const PRICE_PLACEHOLDER: &str = "—";

/// Non-breaking space used by the Polish locale for grouping and the
/// currency suffix.
const NBSP: char = '\u{a0}';

/// Integer parts below this value are not grouped (Polish minimum grouping).
const GROUPING_THRESHOLD: u64 = 10_000;

/// Format an amount as Polish złoty, e.g. `20,00 zł` or `12 345,50 zł`.
pub fn format_pln(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    format!("{sign}{},{fraction:02}{NBSP}zł", group_thousands(whole))
}

/// Format an optional price, falling back to [`PRICE_PLACEHOLDER`].
pub fn format_optional_pln(amount: Option<f64>) -> String {
    amount.map_or_else(|| PRICE_PLACEHOLDER.to_string(), format_pln)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    if value < GROUPING_THRESHOLD {
        return digits;
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(NBSP);
        }
        out.push(ch);
    }
    out
}
