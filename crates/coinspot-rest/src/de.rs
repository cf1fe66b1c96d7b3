//! Lenient deserializers for CoinSpot's numeric fields
//!
//! CoinSpot encodes unavailable numbers as the literal string `"NaN"` in
//! some responses, and occasionally ships numbers as numeric strings.
//! Plain [`Decimal`] fields already accept number-or-numeric-string;
//! this module covers the nullable cases.

use rust_decimal::Decimal;
use serde::de::{Deserializer, Error};
use serde::Deserialize;
use serde_json::Value;

/// Deserialize an optional money field: JSON number or numeric string
/// parse to a [`Decimal`]; `null`, a missing value, or the literal
/// `"NaN"` map to `None`; anything else is a shape violation.
pub fn decimal_opt<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) if text == "NaN" => Ok(None),
        Some(other) => <Decimal as Deserialize>::deserialize(other).map(Some).map_err(D::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::decimal_opt")]
        rate: Option<rust_decimal::Decimal>,
    }

    #[test]
    fn test_number_passes_through() {
        let probe: Probe = serde_json::from_str(r#"{"rate": 1.25}"#).unwrap();
        assert_eq!(probe.rate, Some(dec!(1.25)));
    }

    #[test]
    fn test_numeric_string_is_coerced() {
        let probe: Probe = serde_json::from_str(r#"{"rate": "42690.5"}"#).unwrap();
        assert_eq!(probe.rate, Some(dec!(42690.5)));
    }

    #[test]
    fn test_nan_string_maps_to_none() {
        let probe: Probe = serde_json::from_str(r#"{"rate": "NaN"}"#).unwrap();
        assert_eq!(probe.rate, None);
    }

    #[test]
    fn test_null_and_missing_map_to_none() {
        let probe: Probe = serde_json::from_str(r#"{"rate": null}"#).unwrap();
        assert_eq!(probe.rate, None);

        let probe: Probe = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(probe.rate, None);
    }

    #[test]
    fn test_non_numeric_string_is_rejected() {
        let result = serde_json::from_str::<Probe>(r#"{"rate": "soon"}"#);
        assert!(result.is_err());
    }
}
