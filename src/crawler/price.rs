//! Normalisation of scraped price text into a numeric [`Price`].

use thiserror::Error;

use crate::domain::types::Price;

/// Reasons a scraped string could not be turned into a price.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PriceParseError {
    #[error("no digits in price text {0:?}")]
    NoDigits(String),
    #[error("unparsable price {0:?}")]
    Invalid(String),
    #[error("price must be greater than zero, got {0:?}")]
    NonPositive(String),
}

/// Parse text such as `"₹12,345"`, `"$1,299.99"` or `"1.234,56 €"`.
///
/// Only the first number in the text is considered, so strings carrying a
/// second (struck-through) price still resolve to the current one.
pub fn parse_price(text: &str) -> Result<Price, PriceParseError> {
    let token = first_number_token(text).ok_or_else(|| PriceParseError::NoDigits(text.into()))?;
    let normalized = normalize_separators(token);

    let value: f64 = normalized
        .parse()
        .map_err(|_| PriceParseError::Invalid(token.to_string()))?;

    Price::new(value).map_err(|_| PriceParseError::NonPositive(token.to_string()))
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == ',' || c == '.'
}

/// First run of digits and separators that contains at least one digit.
///
/// A leading `.` is kept as a decimal point (`$.99`) unless it closes an
/// abbreviation such as `Rs.450`.
fn first_number_token(text: &str) -> Option<&str> {
    let is_separator = |c: char| c == ',' || c == '.';

    let mut rest = text;
    while let Some(start) = rest.find(is_number_char) {
        let candidate = &rest[start..];
        let end = candidate
            .find(|c: char| !is_number_char(c))
            .unwrap_or(candidate.len());
        let token = candidate[..end].trim_end_matches(is_separator);
        if token.chars().any(|c| c.is_ascii_digit()) {
            let digits_at = token.len() - token.trim_start_matches(is_separator).len();
            let after_letter = rest[..start]
                .chars()
                .next_back()
                .is_some_and(char::is_alphabetic);
            if digits_at > 0 && token[..digits_at].ends_with('.') && !after_letter {
                return Some(&token[digits_at - 1..]);
            }
            return Some(&token[digits_at..]);
        }
        rest = &candidate[end..];
    }
    None
}

/// Rewrite grouping/decimal separators into a plain `f64` literal.
fn normalize_separators(token: &str) -> String {
    let last_comma = token.rfind(',');
    let last_dot = token.rfind('.');

    match (last_comma, last_dot) {
        (Some(comma), Some(dot)) if comma > dot => token.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => token.replace(',', ""),
        (Some(comma), None) => {
            let decimals = token.len() - comma - 1;
            if token.matches(',').count() == 1 && (1..=2).contains(&decimals) {
                token.replace(',', ".")
            } else {
                token.replace(',', "")
            }
        }
        (None, Some(_)) if token.matches('.').count() > 1 => token.replace('.', ""),
        _ => token.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(text: &str) -> f64 {
        parse_price(text).unwrap().get()
    }

    #[test]
    fn strips_currency_and_grouping() {
        assert_eq!(parsed("₹12,345"), 12345.0);
        assert_eq!(parsed("₹ 1,23,456"), 123456.0);
        assert_eq!(parsed("$1,299.99"), 1299.99);
        assert_eq!(parsed("Rs. 450"), 450.0);
        assert_eq!(parsed("Rs.450"), 450.0);
    }

    #[test]
    fn handles_european_separators() {
        assert_eq!(parsed("1.234,56 €"), 1234.56);
        assert_eq!(parsed("12,5"), 12.5);
        assert_eq!(parsed("1.234.567"), 1234567.0);
    }

    #[test]
    fn ignores_trailing_separator_and_second_price() {
        assert_eq!(parsed("12,345."), 12345.0);
        assert_eq!(parsed("₹1,299 ₹1,999 35% off"), 1299.0);
    }

    #[test]
    fn leading_dot_is_a_decimal_point() {
        assert_eq!(parsed("$.99"), 0.99);
        assert_eq!(parsed("₹ .50"), 0.5);
        assert_eq!(parsed("Price: ,.75"), 0.75);
        assert_eq!(parsed("Rs.450"), 450.0);
        assert_eq!(parsed("Rs..450"), 450.0);
    }

    #[test]
    fn skips_separator_only_runs() {
        assert_eq!(parsed("... ₹899"), 899.0);
    }

    #[test]
    fn rejects_text_without_digits() {
        assert_eq!(
            parse_price("Currently unavailable"),
            Err(PriceParseError::NoDigits("Currently unavailable".into()))
        );
        assert!(matches!(parse_price(""), Err(PriceParseError::NoDigits(_))));
    }

    #[test]
    fn rejects_zero() {
        assert_eq!(
            parse_price("₹0"),
            Err(PriceParseError::NonPositive("0".into()))
        );
    }
}
