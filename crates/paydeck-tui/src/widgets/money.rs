//! Monetary amount formatting for tables and stat tiles.

use rust_decimal::Decimal;

/// Format an amount with thousands grouping and its currency code,
/// e.g. `1,234,567.89 EUR`.
pub fn fmt_money(amount: Decimal, currency: &str) -> String {
    format!("{} {currency}", group_thousands(amount))
}

/// Insert `,` thousands separators into a decimal's integer digits.
pub fn group_thousands(amount: Decimal) -> String {
    let raw = amount.to_string();
    let (sign, unsigned) = raw
        .strip_prefix('-')
        .map_or(("", raw.as_str()), |rest| ("-", rest));
    let (int_part, frac_part) = unsigned
        .split_once('.')
        .map_or((unsigned, None), |(i, f)| (i, Some(f)));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        let remaining = int_part.len() - idx;
        if idx > 0 && remaining % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_integer_digits() {
        assert_eq!(group_thousands(Decimal::new(123_456_789, 0)), "123,456,789");
        assert_eq!(group_thousands(Decimal::new(1_234, 0)), "1,234");
        assert_eq!(group_thousands(Decimal::new(999, 0)), "999");
    }

    #[test]
    fn keeps_fractional_digits_ungrouped() {
        assert_eq!(group_thousands(Decimal::new(1_234_567_89, 2)), "1,234,567.89");
    }

    #[test]
    fn handles_negative_amounts() {
        assert_eq!(group_thousands(Decimal::new(-1_234_50, 2)), "-1,234.50");
    }

    #[test]
    fn small_amounts_untouched() {
        assert_eq!(group_thousands(Decimal::new(12_50, 2)), "12.50");
        assert_eq!(fmt_money(Decimal::new(12_50, 2), "EUR"), "12.50 EUR");
    }
}
