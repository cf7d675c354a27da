//! Free-text number extraction
//!
//! Turns what the user typed into numbers the dialogue can store: the salary
//! (with an optional currency word) and the plain amount / year answers.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Currency used when the salary message names none
pub const DEFAULT_CURRENCY: &str = "جنيه";

/// Recognized currency words. Longest first so that "جنيه استرليني"
/// is not cut short by the plain "جنيه" alternative.
pub const RECOGNIZED_CURRENCIES: [&str; 4] = ["جنيه استرليني", "جنيه", "دولار", "يورو"];

/// First decimal number, optionally followed by a currency word
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    let currencies = RECOGNIZED_CURRENCIES.join("|");
    Regex::new(&format!(r"([0-9]+(?:\.[0-9]+)?)\s*({currencies})?"))
        .expect("amount pattern is valid")
});

/// Salary figure extracted from a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    /// Parsed amount
    pub amount: f64,
    /// Currency label, either recognized in the text or the default
    pub currency: String,
}

/// Map Eastern Arabic-Indic and Persian digits to ASCII.
///
/// Borrows when there is nothing to rewrite.
pub fn normalize_digits(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| localized_digit(c).is_some()) {
        return Cow::Borrowed(text);
    }

    Cow::Owned(
        text.chars()
            .map(|c| localized_digit(c).unwrap_or(c))
            .collect(),
    )
}

fn localized_digit(c: char) -> Option<char> {
    let offset = match c {
        '\u{0660}'..='\u{0669}' => u32::from(c) - 0x0660,
        '\u{06F0}'..='\u{06F9}' => u32::from(c) - 0x06F0,
        _ => return None,
    };
    char::from_digit(offset, 10)
}

/// Find the first number in `text` and the currency word right after it.
///
/// Returns `None` when the text holds no number at all. Signs are not part
/// of the token, so "-200" reads as 200.
pub fn extract_financial_info(text: &str, default_currency: &str) -> Option<Income> {
    let normalized = normalize_digits(text);
    let lowered = normalized.to_lowercase();

    let captures = AMOUNT_RE.captures(&lowered)?;
    let amount = captures.get(1)?.as_str().parse::<f64>().ok()?;
    let currency = captures
        .get(2)
        .map_or_else(|| default_currency.to_string(), |m| m.as_str().to_string());

    Some(Income { amount, currency })
}

/// Parse a whole message as a plain decimal number
pub fn parse_amount(text: &str) -> Option<f64> {
    normalize_digits(text.trim())
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse a whole message as a non-negative whole number of years
pub fn parse_years(text: &str) -> Option<u32> {
    normalize_digits(text.trim()).parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_with_currency() {
        let income = extract_financial_info("5000 جنيه", DEFAULT_CURRENCY).unwrap();
        assert_eq!(income.amount, 5000.0);
        assert_eq!(income.currency, "جنيه");

        let income = extract_financial_info("راتبي 1200.50 دولار شهرياً", DEFAULT_CURRENCY).unwrap();
        assert_eq!(income.amount, 1200.5);
        assert_eq!(income.currency, "دولار");
    }

    #[test]
    fn test_extract_defaults_currency() {
        let income = extract_financial_info("my salary is 7000", DEFAULT_CURRENCY).unwrap();
        assert_eq!(income.amount, 7000.0);
        assert_eq!(income.currency, DEFAULT_CURRENCY);

        let income = extract_financial_info("7000", "USD").unwrap();
        assert_eq!(income.currency, "USD");
    }

    #[test]
    fn test_extract_sterling_not_truncated() {
        let income = extract_financial_info("3000 جنيه استرليني", DEFAULT_CURRENCY).unwrap();
        assert_eq!(income.currency, "جنيه استرليني");
    }

    #[test]
    fn test_extract_first_number_only() {
        let income = extract_financial_info("4000 يورو و 200 دولار", DEFAULT_CURRENCY).unwrap();
        assert_eq!(income.amount, 4000.0);
        assert_eq!(income.currency, "يورو");

        let income = extract_financial_info("between 10 and 20", DEFAULT_CURRENCY).unwrap();
        assert_eq!(income.amount, 10.0);
    }

    #[test]
    fn test_extract_currency_must_follow_number() {
        let income = extract_financial_info("دولار 900", DEFAULT_CURRENCY).unwrap();
        assert_eq!(income.amount, 900.0);
        assert_eq!(income.currency, DEFAULT_CURRENCY);
    }

    #[test]
    fn test_extract_without_number() {
        assert!(extract_financial_info("hello bot", DEFAULT_CURRENCY).is_none());
        assert!(extract_financial_info("", DEFAULT_CURRENCY).is_none());
        assert!(extract_financial_info("   ", DEFAULT_CURRENCY).is_none());
    }

    #[test]
    fn test_extract_sign_and_zero() {
        let income = extract_financial_info("-250", DEFAULT_CURRENCY).unwrap();
        assert_eq!(income.amount, 250.0);

        let income = extract_financial_info("0 دولار", DEFAULT_CURRENCY).unwrap();
        assert_eq!(income.amount, 0.0);
    }

    #[test]
    fn test_extract_localized_digits() {
        let income = extract_financial_info("٥٠٠٠ دولار", DEFAULT_CURRENCY).unwrap();
        assert_eq!(income.amount, 5000.0);
        assert_eq!(income.currency, "دولار");

        let income = extract_financial_info("۱۲۰۰", DEFAULT_CURRENCY).unwrap();
        assert_eq!(income.amount, 1200.0);
    }

    #[test]
    fn test_normalize_digits_borrows_plain_text() {
        assert!(matches!(normalize_digits("1234"), Cow::Borrowed(_)));
        assert_eq!(normalize_digits("٣٫5"), "3٫5");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1000"), Some(1000.0));
        assert_eq!(parse_amount(" 250.75 "), Some(250.75));
        assert_eq!(parse_amount("١٠٠٠"), Some(1000.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("1000 دولار"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("NaN"), None);
    }

    #[test]
    fn test_parse_years() {
        assert_eq!(parse_years("2"), Some(2));
        assert_eq!(parse_years(" 10\n"), Some(10));
        assert_eq!(parse_years("0"), Some(0));
        assert_eq!(parse_years("٣"), Some(3));
        assert_eq!(parse_years("2.5"), None);
        assert_eq!(parse_years("-1"), None);
        assert_eq!(parse_years("two"), None);
    }
}
