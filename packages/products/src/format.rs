//! Price and description formatting shared by both renderers

use storefront_content::text::take_chars;

pub const CURRENCY_SYMBOL: &str = "₱";

/// Descriptions longer than this are cut and suffixed with `...`
pub const DESCRIPTION_LIMIT: usize = 100;

/// `₱` + thousands separators + two decimals. Non-finite or negative prices
/// show as zero.
pub fn format_price(price: f64) -> String {
    let price = if price.is_finite() && price > 0.0 { price } else { 0.0 };
    let cents = (price * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    format!("{}{}.{:02}", CURRENCY_SYMBOL, group_thousands(whole), fraction)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Trimmed description, cut at [`DESCRIPTION_LIMIT`] characters
pub fn truncate_description(description: &str) -> String {
    let description = description.trim();
    if description.chars().count() <= DESCRIPTION_LIMIT {
        return description.to_string();
    }
    format!("{}...", take_chars(description, DESCRIPTION_LIMIT).trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(199.5), "₱199.50");
        assert_eq!(format_price(0.0), "₱0.00");
        assert_eq!(format_price(1234567.891), "₱1,234,567.89");
        assert_eq!(format_price(1000.0), "₱1,000.00");
        assert_eq!(format_price(999.999), "₱1,000.00");
        assert_eq!(format_price(f64::NAN), "₱0.00");
        assert_eq!(format_price(-5.0), "₱0.00");
    }

    #[test]
    fn test_truncate_description() {
        assert_eq!(truncate_description("  Short  "), "Short");

        let exact = "a".repeat(DESCRIPTION_LIMIT);
        assert_eq!(truncate_description(&exact), exact);

        let long = "é".repeat(DESCRIPTION_LIMIT + 5);
        let cut = truncate_description(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), DESCRIPTION_LIMIT + 3);
    }
}
