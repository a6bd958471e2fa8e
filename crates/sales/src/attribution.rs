//! Attribution store: the salesperson credited for an order line.
//!
//! An attribution is all-or-nothing: either the line carries an id, a name and
//! an optional image reference, or it carries nothing. Clearing is requested
//! with a missing or blank id.

use serde::{Deserialize, Serialize};

use posline_core::{SalespersonId, ValueObject};

use crate::order::OrderLine;

/// Reference to a displayable image (usually a `data:` URL).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Wrap a raw base64 PNG payload as a `data:` URL.
    ///
    /// Returns `None` for an empty payload; records without an image have no
    /// image reference at all.
    pub fn from_base64_png(payload: &str) -> Option<Self> {
        let payload = payload.trim();
        if payload.is_empty() {
            return None;
        }
        if payload.starts_with("data:") {
            return Some(Self(payload.to_string()));
        }
        Some(Self(format!("data:image/png;base64,{payload}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for ImageRef {}

/// Salesperson credited on an order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub person_id: SalespersonId,
    pub person_name: String,
    pub image_ref: Option<ImageRef>,
}

impl ValueObject for Attribution {}

impl Attribution {
    pub fn display(&self) -> DisplayAttribution {
        DisplayAttribution {
            person_name: self.person_name.clone(),
            image_ref: self.image_ref.clone(),
        }
    }
}

/// What the order-line widget shows next to the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayAttribution {
    pub person_name: String,
    pub image_ref: Option<ImageRef>,
}

impl OrderLine {
    pub fn attribution(&self) -> Option<&Attribution> {
        self.attribution.as_ref()
    }

    /// Set (or clear) the salesperson credited on this line.
    ///
    /// A missing or blank `person_id` clears the whole attribution, whatever
    /// name or image accompany it. A missing name is stored as empty.
    pub fn set_attribution(
        &mut self,
        person_id: Option<SalespersonId>,
        person_name: Option<&str>,
        image_ref: Option<ImageRef>,
    ) {
        match person_id.filter(|id| !id.is_blank()) {
            Some(person_id) => {
                tracing::debug!(
                    line_id = %self.id,
                    person_id = %person_id,
                    "attributing order line"
                );
                self.attribution = Some(Attribution {
                    person_id,
                    person_name: person_name.unwrap_or_default().to_string(),
                    image_ref,
                });
            }
            None => self.clear_attribution(),
        }
    }

    /// Store an already-built attribution.
    pub fn attribute(&mut self, attribution: Attribution) {
        self.set_attribution(
            Some(attribution.person_id),
            Some(&attribution.person_name),
            attribution.image_ref,
        );
    }

    pub fn clear_attribution(&mut self) {
        if self.attribution.take().is_some() {
            tracing::debug!(line_id = %self.id, "cleared order line attribution");
        }
    }

    /// Display data for the line widget; `None` when never attributed.
    pub fn display_attribution(&self) -> Option<DisplayAttribution> {
        self.attribution.as_ref().map(Attribution::display)
    }
}

/// Apply the same attribution to every line given.
pub fn set_attribution_for_all<'a>(
    lines: impl IntoIterator<Item = &'a mut OrderLine>,
    person_id: Option<SalespersonId>,
    person_name: Option<&str>,
    image_ref: Option<ImageRef>,
) {
    for line in lines {
        line.set_attribution(person_id.clone(), person_name, image_ref.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posline_core::LineId;

    fn test_line(id: i64) -> OrderLine {
        OrderLine::new(LineId::from(id), "Espresso", 1, 250)
    }

    #[test]
    fn new_line_has_no_display_attribution() {
        let line = test_line(1);
        assert_eq!(line.display_attribution(), None);
        assert!(line.attribution().is_none());
    }

    #[test]
    fn set_attribution_stores_all_three_fields() {
        let mut line = test_line(1);
        let image = ImageRef::from_base64_png("iVBORw0KGgo");
        line.set_attribution(Some(SalespersonId::from(4)), Some("Alice"), image.clone());

        let attribution = line.attribution().unwrap();
        assert_eq!(attribution.person_id, SalespersonId::from(4));
        assert_eq!(attribution.person_name, "Alice");
        assert_eq!(attribution.image_ref, image);

        assert_eq!(
            line.display_attribution(),
            Some(DisplayAttribution {
                person_name: "Alice".to_string(),
                image_ref: image,
            })
        );
    }

    #[test]
    fn missing_id_clears_even_when_name_is_given() {
        let mut line = test_line(1);
        line.set_attribution(Some(SalespersonId::from(4)), Some("Alice"), None);

        line.set_attribution(None, Some("Bob"), None);

        assert!(line.attribution().is_none());
    }

    #[test]
    fn blank_id_clears() {
        let mut line = test_line(1);
        line.set_attribution(Some(SalespersonId::from(4)), Some("Alice"), None);

        line.set_attribution(Some(SalespersonId::from("")), None, None);

        assert_eq!(line.display_attribution(), None);
    }

    #[test]
    fn reassignment_replaces_previous_attribution() {
        let mut line = test_line(1);
        line.set_attribution(
            Some(SalespersonId::from(4)),
            Some("Alice"),
            ImageRef::from_base64_png("AAAA"),
        );
        line.set_attribution(Some(SalespersonId::from(5)), Some("Bob"), None);

        let attribution = line.attribution().unwrap();
        assert_eq!(attribution.person_id, SalespersonId::from(5));
        assert_eq!(attribution.person_name, "Bob");
        assert_eq!(attribution.image_ref, None);
    }

    #[test]
    fn set_attribution_for_all_gives_every_line_the_same_value() {
        let mut lines = vec![test_line(1), test_line(2)];

        set_attribution_for_all(
            lines.iter_mut(),
            Some(SalespersonId::from(9)),
            Some("Carol"),
            None,
        );

        assert_eq!(lines[0].attribution(), lines[1].attribution());
        assert_eq!(lines[0].attribution().unwrap().person_name, "Carol");
    }

    #[test]
    fn image_ref_wraps_raw_base64_and_ignores_empty_payloads() {
        assert_eq!(
            ImageRef::from_base64_png("QUJD").unwrap().as_str(),
            "data:image/png;base64,QUJD"
        );
        assert_eq!(
            ImageRef::from_base64_png("data:image/jpeg;base64,QUJD")
                .unwrap()
                .as_str(),
            "data:image/jpeg;base64,QUJD"
        );
        assert_eq!(ImageRef::from_base64_png("  "), None);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_person_id() -> impl Strategy<Value = Option<SalespersonId>> {
            prop_oneof![
                Just(None),
                any::<i64>().prop_map(|n| Some(SalespersonId::from(n))),
                "[a-z0-9-]{0,8}".prop_map(|s| Some(SalespersonId::from(s.as_str()))),
            ]
        }

        proptest! {
            /// Property: clearing always leaves no display attribution, from any prior state.
            #[test]
            fn clearing_leaves_no_display_attribution(
                prior_id in arb_person_id(),
                prior_name in proptest::option::of("[A-Za-z ]{0,12}"),
            ) {
                let mut line = test_line(1);
                line.set_attribution(prior_id, prior_name.as_deref(), None);

                line.set_attribution(None, None, None);

                prop_assert_eq!(line.display_attribution(), None);
            }
        }
    }
}
