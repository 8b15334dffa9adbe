//! Deserialization helpers for form-style input.
//!
//! Browsers and simple clients send blank strings for untouched fields.
//! These helpers turn blanks into `None` so the services only ever see
//! "absent" or "present with a value".

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;

/// `None`, `null`, `""` and whitespace-only strings become `None`; anything
/// else is trimmed.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

/// Accepts a JSON integer, a numeric string, `null` or a blank string.
pub fn optional_int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptionalInt;

    impl<'de> Visitor<'de> for OptionalInt {
        type Value = Option<i32>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an integer, a numeric string or nothing")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(self)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            i32::try_from(v).map(Some).map_err(E::custom)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            i32::try_from(v).map(Some).map_err(E::custom)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let v = v.trim();
            if v.is_empty() {
                return Ok(None);
            }
            v.parse::<i32>()
                .map(Some)
                .map_err(|_| E::custom(format!("'{}' is not a whole number", v)))
        }
    }

    deserializer.deserialize_any(OptionalInt)
}
