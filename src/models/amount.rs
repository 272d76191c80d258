//! Locale-aware amount parsing.
//!
//! Amounts typed into the GranaApp forms use the Brazilian convention
//! (`1.234,56`, optionally prefixed with `R$`). This module turns such input
//! into a [`Decimal`] and provides serde helpers so request fields accept
//! either a JSON number or a formatted string.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserializer;
use serde::de::{self, Visitor};

use crate::error::{EngineError, EngineResult};

/// Parses a user-entered amount.
///
/// When the input contains a comma, dots are treated as thousands separators
/// and the comma as the decimal separator, so a dot may not follow the comma.
/// Otherwise the input is parsed as a plain decimal number: `"1.234"` is one
/// point two three four, not one thousand.
///
/// # Example
///
/// ```
/// use grana_engine::models::parse_locale_decimal;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(parse_locale_decimal("R$ 1.234,56").unwrap(), Decimal::from_str("1234.56").unwrap());
/// assert_eq!(parse_locale_decimal("-12,5").unwrap(), Decimal::from_str("-12.5").unwrap());
/// assert_eq!(parse_locale_decimal("99.90").unwrap(), Decimal::from_str("99.90").unwrap());
/// assert!(parse_locale_decimal("1,234.56").is_err());
/// assert!(parse_locale_decimal("abc").is_err());
/// ```
pub fn parse_locale_decimal(input: &str) -> EngineResult<Decimal> {
    let cleaned: String = input
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Err(EngineError::InvalidAmount {
            input: input.to_string(),
            message: "amount is empty".to_string(),
        });
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(comma), Some(dot)) if dot > comma => {
            return Err(EngineError::InvalidAmount {
                input: input.to_string(),
                message: "decimal comma must come after the thousands dots".to_string(),
            });
        }
        (Some(_), _) => cleaned.replace('.', "").replace(',', "."),
        (None, _) => cleaned,
    };

    Decimal::from_str(&normalized).map_err(|e| EngineError::InvalidAmount {
        input: input.to_string(),
        message: e.to_string(),
    })
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Option<Decimal>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number or a formatted amount string")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(Decimal::from(value)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Some(Decimal::from(value)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Decimal::from_f64(value)
            .map(Some)
            .ok_or_else(|| E::custom(format!("amount {} is not representable", value)))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        parse_locale_decimal(value).map(Some).map_err(E::custom)
    }
}

/// Deserializes an optional amount from a number, a formatted string or null.
///
/// Use together with `#[serde(default)]` so that a missing field becomes `None`.
pub fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(AmountVisitor)
}

/// Deserializes a required amount from a number or a formatted string.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer
        .deserialize_any(AmountVisitor)?
        .ok_or_else(|| de::Error::custom("amount is required"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(deserialize_with = "deserialize_amount")]
        required: Decimal,
        #[serde(default, deserialize_with = "deserialize_optional_amount")]
        optional: Option<Decimal>,
    }

    #[test]
    fn test_parses_plain_decimal() {
        assert_eq!(parse_locale_decimal("1234.5").unwrap(), dec("1234.5"));
    }

    #[test]
    fn test_parses_brazilian_format_with_thousands() {
        assert_eq!(parse_locale_decimal("1.234.567,89").unwrap(), dec("1234567.89"));
    }

    #[test]
    fn test_parses_currency_prefix_and_spaces() {
        assert_eq!(parse_locale_decimal("  R$ 45,00 ").unwrap(), dec("45.00"));
    }

    #[test]
    fn test_rejects_empty_input() {
        match parse_locale_decimal("   ") {
            Err(EngineError::InvalidAmount { message, .. }) => {
                assert_eq!(message, "amount is empty");
            }
            other => panic!("Expected InvalidAmount error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_dot_after_decimal_comma() {
        match parse_locale_decimal("1,234.56") {
            Err(EngineError::InvalidAmount { input, .. }) => assert_eq!(input, "1,234.56"),
            other => panic!("Expected InvalidAmount error, got {:?}", other),
        }
        assert!(parse_locale_decimal("R$ 1.000,00.5").is_err());
    }

    #[test]
    fn test_dot_without_comma_is_a_decimal_point() {
        assert_eq!(parse_locale_decimal("1.234").unwrap(), dec("1.234"));
        assert_eq!(parse_locale_decimal("1.234,0").unwrap(), dec("1234.0"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_locale_decimal("12,3,4").is_err());
        assert!(parse_locale_decimal("dez reais").is_err());
    }

    #[test]
    fn test_form_accepts_numbers_and_strings() {
        let form: Form = serde_json::from_str(r#"{ "required": 10, "optional": "1.000,50" }"#).unwrap();
        assert_eq!(form.required, dec("10"));
        assert_eq!(form.optional, Some(dec("1000.50")));

        let form: Form = serde_json::from_str(r#"{ "required": 0.25 }"#).unwrap();
        assert_eq!(form.required, dec("0.25"));
        assert_eq!(form.optional, None);

        let form: Form = serde_json::from_str(r#"{ "required": "7,5", "optional": null }"#).unwrap();
        assert_eq!(form.required, dec("7.5"));
        assert_eq!(form.optional, None);
    }

    #[test]
    fn test_form_rejects_invalid_amount_string() {
        let result: Result<Form, _> = serde_json::from_str(r#"{ "required": "abc" }"#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Invalid amount 'abc'"), "got: {}", message);
    }
}
