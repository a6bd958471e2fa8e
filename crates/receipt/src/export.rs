use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Export object computed by the host for an order (opaque to us).
pub type BaseExport = Map<String, JsonValue>;

/// Key of the header section inside the host export.
pub const HEADER_KEY: &str = "headerData";

/// Fields this crate adds to the receipt header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptHeader {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_address: Option<String>,
    pub company_name_clean: String,
    pub company_details_clean: String,
    /// Distinct salesperson names, in order of first appearance on the lines.
    pub salespersons: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_logo: Option<String>,
}

/// Receipt export: the host's base export plus [`ReceiptHeader`].
///
/// Immutable once built; [`ReceiptExport::to_value`] renders the merged
/// object the print layer consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptExport {
    base: BaseExport,
    header: Option<ReceiptHeader>,
}

impl ReceiptExport {
    pub(crate) fn new(base: BaseExport, header: ReceiptHeader) -> Self {
        Self {
            base,
            header: Some(header),
        }
    }

    /// The base export, passed through with nothing added.
    pub fn passthrough(base: BaseExport) -> Self {
        Self { base, header: None }
    }

    pub fn base(&self) -> &BaseExport {
        &self.base
    }

    pub fn header(&self) -> Option<&ReceiptHeader> {
        self.header.as_ref()
    }

    pub fn salespersons(&self) -> &[String] {
        self.header
            .as_ref()
            .map(|h| h.salespersons.as_slice())
            .unwrap_or_default()
    }

    pub(crate) fn map_header(mut self, f: impl FnOnce(&mut ReceiptHeader)) -> Self {
        if let Some(header) = self.header.as_mut() {
            f(header);
        }
        self
    }

    /// Merge the header fields into the base export's header section.
    ///
    /// A missing or `null` header section is created. Keys the host already
    /// set are left as they are. A header section that is not an object is
    /// left untouched and nothing is merged.
    pub fn to_value(&self) -> JsonValue {
        let mut merged = self.base.clone();
        let Some(header) = &self.header else {
            return JsonValue::Object(merged);
        };

        let section = merged
            .entry(HEADER_KEY)
            .or_insert_with(|| JsonValue::Object(Map::new()));
        if section.is_null() {
            *section = JsonValue::Object(Map::new());
        }

        match (section, serde_json::to_value(header)) {
            (JsonValue::Object(section), Ok(JsonValue::Object(fields))) => {
                for (key, value) in fields {
                    if section.contains_key(&key) {
                        tracing::debug!(
                            key = %key,
                            "host already set receipt header field; keeping host value"
                        );
                        continue;
                    }
                    section.insert(key, value);
                }
            }
            (JsonValue::Object(_), _) => {}
            (_, _) => {
                tracing::warn!(
                    "receipt header section is not an object; extension fields not merged"
                );
            }
        }

        JsonValue::Object(merged)
    }
}
