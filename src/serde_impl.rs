//! `serde` support for [`Identifier`], serializing as a decimal string (to
//! preserve precision for JSON consumers whose numeric type cannot hold a
//! full 64-bit mantissa) while accepting both decimal-string and unquoted
//! numeric input.

use core::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::id::Identifier;

impl Serialize for Identifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

struct IdentifierVisitor;

impl Visitor<'_> for IdentifierVisitor {
    type Value = Identifier;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a decimal string or an integer identifying a 64-bit identifier")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Identifier::from_decimal_string(value).map_err(|err| E::custom(err.to_string()))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if value < 0 {
            return Err(E::custom("identifier must be non-negative"));
        }
        Ok(Identifier::from_i64(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        i64::try_from(value)
            .map(Identifier::from_i64)
            .map_err(|_| E::custom("identifier exceeds the valid positive i64 range"))
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(IdentifierVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_as_decimal_string() {
        let id = Identifier::from_i64(123456789);
        let value = serde_json::to_value(id).unwrap();
        assert_eq!(value, json!("123456789"));
    }

    #[test]
    fn deserializes_from_decimal_string() {
        let id: Identifier = serde_json::from_value(json!("123456789")).unwrap();
        assert_eq!(id.int64(), 123456789);
    }

    #[test]
    fn deserializes_from_unquoted_number() {
        let id: Identifier = serde_json::from_value(json!(123456789)).unwrap();
        assert_eq!(id.int64(), 123456789);
    }

    #[test]
    fn rejects_negative_unquoted_number() {
        let result: Result<Identifier, _> = serde_json::from_value(json!(-1));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_garbage_string() {
        let result: Result<Identifier, _> = serde_json::from_value(json!("not a number"));
        assert!(result.is_err());
    }
}
