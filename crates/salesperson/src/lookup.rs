use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use posline_core::{PosConfigId, RecordKey, SalespersonId, ValueObject};
use posline_sales::{Attribution, ImageRef};

/// A salesperson offered for selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: SalespersonId,
    pub name: String,
    pub image_ref: Option<ImageRef>,
}

impl ValueObject for Candidate {}

impl Candidate {
    /// Parse one record of a lookup response.
    ///
    /// Expected shape: `{ "id": int|string, "name": string, "image_128": string|false|null }`.
    /// The image payload is raw base64 and is turned into a `data:` URL.
    pub fn from_payload(value: &JsonValue) -> Result<Self, LookupError> {
        let record = value
            .as_object()
            .ok_or_else(|| LookupError::Malformed("candidate is not an object".to_string()))?;

        let id = record
            .get("id")
            .and_then(RecordKey::from_json)
            .map(SalespersonId::from)
            .ok_or_else(|| LookupError::Malformed("candidate without a usable id".to_string()))?;

        let name = record
            .get("name")
            .and_then(JsonValue::as_str)
            .unwrap_or_default()
            .to_string();

        // The backend sends `false` for records without an image.
        let image_ref = record
            .get("image_128")
            .and_then(JsonValue::as_str)
            .and_then(ImageRef::from_base64_png);

        Ok(Self { id, name, image_ref })
    }

    /// Parse a whole lookup response (a JSON array; `null` means "none").
    pub fn list_from_payload(value: &JsonValue) -> Result<Vec<Self>, LookupError> {
        match value {
            JsonValue::Null => Ok(Vec::new()),
            JsonValue::Array(items) => items.iter().map(Self::from_payload).collect(),
            _ => Err(LookupError::Malformed(
                "lookup response is not a list".to_string(),
            )),
        }
    }

    pub fn to_attribution(&self) -> Attribution {
        Attribution {
            person_id: self.id.clone(),
            person_name: self.name.clone(),
            image_ref: self.image_ref.clone(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("candidate lookup failed: {0}")]
    Transport(String),

    #[error("malformed candidate data: {0}")]
    Malformed(String),
}

/// Source of selectable salespersons for a till.
///
/// An empty list is a normal answer (feature disabled, nobody allowed, unknown
/// till); errors are reserved for the lookup itself failing.
#[async_trait::async_trait]
pub trait CandidateLookup: Send + Sync {
    async fn candidates(
        &self,
        config_id: Option<&PosConfigId>,
    ) -> Result<Vec<Candidate>, LookupError>;

    /// Resolve a single id among the till's candidates.
    async fn resolve(
        &self,
        config_id: Option<&PosConfigId>,
        id: &SalespersonId,
    ) -> Result<Option<Candidate>, LookupError> {
        let candidates = self.candidates(config_id).await?;
        let key = id.to_string();
        Ok(candidates.into_iter().find(|c| c.id.matches(&key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_backend_records() {
        let candidates = Candidate::list_from_payload(&json!([
            { "id": 3, "name": "Alice", "image_128": "QUJD" },
            { "id": 4, "name": "Bob", "image_128": false },
        ]))
        .unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id, SalespersonId::from(3));
        assert_eq!(
            candidates[0].image_ref.as_ref().map(ImageRef::as_str),
            Some("data:image/png;base64,QUJD")
        );
        assert_eq!(candidates[1].name, "Bob");
        assert_eq!(candidates[1].image_ref, None);
    }

    #[test]
    fn null_response_is_an_empty_list() {
        assert!(Candidate::list_from_payload(&json!(null)).unwrap().is_empty());
    }

    #[test]
    fn record_without_id_is_malformed() {
        let err = Candidate::from_payload(&json!({ "name": "Ghost" })).unwrap_err();
        assert!(matches!(err, LookupError::Malformed(_)));

        let err = Candidate::list_from_payload(&json!({ "id": 1 })).unwrap_err();
        assert!(matches!(err, LookupError::Malformed(_)));
    }

    #[test]
    fn attribution_copies_candidate_fields() {
        let candidate = Candidate {
            id: SalespersonId::from(3),
            name: "Alice".to_string(),
            image_ref: ImageRef::from_base64_png("QUJD"),
        };

        let attribution = candidate.to_attribution();

        assert_eq!(attribution.person_id, candidate.id);
        assert_eq!(attribution.person_name, "Alice");
        assert_eq!(attribution.image_ref, candidate.image_ref);
    }
}
