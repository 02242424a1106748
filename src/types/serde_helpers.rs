//! Serde helpers for Kraken's loosely typed response fields.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

/// Deserialize a limit that Kraken reports as `false` when there is none.
///
/// Accepts `false`, `null`, a decimal string, or a JSON number.
///
/// ```rust
/// use rust_decimal::Decimal;
/// use serde::Deserialize;
/// use kraken_rest_client::types::serde_helpers::maybe_decimal;
///
/// #[derive(Deserialize)]
/// struct Method {
///     #[serde(deserialize_with = "maybe_decimal", default)]
///     limit: Option<Decimal>,
/// }
///
/// let unlimited: Method = serde_json::from_str(r#"{"limit":false}"#).unwrap();
/// assert!(unlimited.limit.is_none());
///
/// let capped: Method = serde_json::from_str(r#"{"limit":"100.0"}"#).unwrap();
/// assert_eq!(capped.limit.unwrap().to_string(), "100.0");
/// ```
pub fn maybe_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(s)) => s.parse().map(Some).map_err(de::Error::custom),
        Some(Value::Number(n)) => n.to_string().parse().map(Some).map_err(de::Error::custom),
        Some(other) => Err(de::Error::custom(format!(
            "expected false or a decimal, got {other}"
        ))),
    }
}

/// Deserialize a string, mapping `""` to `None`.
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.is_empty()))
}

/// Deserialize a cursor that Kraken reports as `false` once exhausted.
pub fn string_or_false<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(de::Error::custom(format!(
            "expected false or a string, got {other}"
        ))),
    }
}
