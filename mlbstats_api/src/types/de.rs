//! Deserialization helpers for fields the API sends as either strings or numbers.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Accepts `"2021"`, `2021` or `null` and yields an optional string.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrNumber::String(s) => s,
        StringOrNumber::Int(i) => i.to_string(),
        StringOrNumber::Float(f) => f.to_string(),
        StringOrNumber::Bool(b) => b.to_string(),
    }))
}

/// Accepts `"12"`, `12` or `null` and yields an optional integer.
/// Strings that are not integers (e.g. `"-"`) become `None`.
pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        StringOrNumber::String(s) => s.trim().parse().ok(),
        StringOrNumber::Int(i) => Some(i),
        StringOrNumber::Float(f) => Some(f as i64),
        StringOrNumber::Bool(_) => None,
    }))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::opt_string")]
        season: Option<String>,
        #[serde(default, deserialize_with = "super::opt_i64")]
        number: Option<i64>,
    }

    #[test]
    fn accepts_strings_and_numbers() {
        let a: Probe = serde_json::from_str(r#"{"season": 2021, "number": "42"}"#).unwrap();
        assert_eq!(a.season.as_deref(), Some("2021"));
        assert_eq!(a.number, Some(42));

        let b: Probe = serde_json::from_str(r#"{"season": "2021", "number": "-"}"#).unwrap();
        assert_eq!(b.season.as_deref(), Some("2021"));
        assert_eq!(b.number, None);

        let c: Probe = serde_json::from_str("{}").unwrap();
        assert!(c.season.is_none());
        assert!(c.number.is_none());
    }
}
