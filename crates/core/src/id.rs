//! Strongly-typed identifiers used across the domain.
//!
//! Record identifiers coming from the POS client are either integers (records
//! already stored by the backend) or strings (client-side temporary ids). Both
//! shapes are kept as-is and compared through their rendered string form.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of an order (client-generated, time-ordered).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for OrderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid =
            Uuid::from_str(s).map_err(|e| DomainError::invalid_id(format!("OrderId: {e}")))?;
        Ok(Self(uuid))
    }
}

/// A string-or-numeric record key.
///
/// Ordering puts every integer key before every text key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordKey {
    Int(i64),
    Text(String),
}

impl RecordKey {
    /// Parse a key, preferring the numeric form when the text is an integer.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(n) => Self::Int(n),
            Err(_) => Self::Text(raw.to_string()),
        }
    }

    /// Blank keys are the "nothing chosen" sentinel.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Int(_) => false,
            Self::Text(s) => s.trim().is_empty(),
        }
    }

    /// Read a key out of a loosely-typed JSON value.
    ///
    /// Accepts integers and non-blank strings; everything else (null, floats,
    /// objects, empty strings) yields `None`.
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Number(n) => n.as_i64().map(Self::Int),
            JsonValue::String(s) if !s.trim().is_empty() => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

impl core::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordKey {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for RecordKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RecordKey {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Identifier of an order line (unique within its order).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(RecordKey);

/// Identifier of a salesperson record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SalespersonId(RecordKey);

/// Identifier of a POS configuration (one per till / shop).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PosConfigId(RecordKey);

macro_rules! impl_record_newtype {
    ($t:ty) => {
        impl $t {
            pub fn new(key: impl Into<RecordKey>) -> Self {
                Self(key.into())
            }

            pub fn key(&self) -> &RecordKey {
                &self.0
            }

            pub fn is_blank(&self) -> bool {
                self.0.is_blank()
            }

            /// String-equality match against a raw identifier.
            pub fn matches(&self, raw: &str) -> bool {
                self.0.to_string() == raw
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(RecordKey::Int(value))
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(RecordKey::from(value))
            }
        }

        impl From<RecordKey> for $t {
            fn from(value: RecordKey) -> Self {
                Self(value)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.trim().is_empty() {
                    return Err(DomainError::invalid_id(format!(
                        "{}: empty identifier",
                        stringify!($t)
                    )));
                }
                Ok(Self(RecordKey::parse(s)))
            }
        }
    };
}

impl_record_newtype!(LineId);
impl_record_newtype!(SalespersonId);
impl_record_newtype!(PosConfigId);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_and_textual_ids_match_by_rendered_form() {
        let numeric = LineId::from(7);
        let textual = LineId::from("7");

        assert_ne!(numeric, textual);
        assert!(numeric.matches("7"));
        assert!(textual.matches(&numeric.to_string()));
    }

    #[test]
    fn order_id_parses_its_own_rendering_and_rejects_garbage() {
        let id = OrderId::new();
        assert_eq!(id.to_string().parse::<OrderId>().unwrap(), id);

        let err = "not-a-uuid".parse::<OrderId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
        assert!(err.to_string().starts_with("invalid identifier: OrderId"));
    }

    #[test]
    fn blank_text_key_is_the_clear_sentinel() {
        assert!(SalespersonId::from("").is_blank());
        assert!(SalespersonId::from("   ").is_blank());
        assert!(!SalespersonId::from(0).is_blank());
    }

    #[test]
    fn record_key_from_json_accepts_only_ints_and_non_blank_strings() {
        assert_eq!(RecordKey::from_json(&json!(12)), Some(RecordKey::Int(12)));
        assert_eq!(
            RecordKey::from_json(&json!("tmp-3")),
            Some(RecordKey::Text("tmp-3".to_string()))
        );
        assert_eq!(RecordKey::from_json(&json!(null)), None);
        assert_eq!(RecordKey::from_json(&json!("")), None);
        assert_eq!(RecordKey::from_json(&json!(1.5)), None);
        assert_eq!(RecordKey::from_json(&json!({ "id": 1 })), None);
    }

    #[test]
    fn record_ids_serialize_transparently() {
        let id = PosConfigId::from(3);
        assert_eq!(serde_json::to_value(&id).unwrap(), json!(3));

        let back: PosConfigId = serde_json::from_value(json!("shop-1")).unwrap();
        assert_eq!(back, PosConfigId::from("shop-1"));
    }

    #[test]
    fn from_str_prefers_numeric_keys_and_rejects_empty() {
        let id: SalespersonId = "42".parse().unwrap();
        assert_eq!(id.key(), &RecordKey::Int(42));

        let err = "".parse::<SalespersonId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: an integer id is addressed by its rendering, numeric or textual.
            #[test]
            fn integer_ids_match_their_rendering(n in any::<i64>()) {
                let id = LineId::from(n);
                prop_assert!(id.matches(&n.to_string()));
                prop_assert_eq!(RecordKey::parse(&n.to_string()), RecordKey::Int(n));
                prop_assert_eq!(LineId::from(n.to_string().as_str()).to_string(), id.to_string());
            }
        }
    }
}
