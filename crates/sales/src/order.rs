use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use posline_core::{Entity, LineId, OrderId, SalespersonId};

use crate::attribution::{Attribution, ImageRef, set_attribution_for_all};

/// Customer the order is billed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    /// Full contact address, as the contact book formats it.
    pub address: Option<String>,
}

/// Company header text as configured for the till (may contain markup).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyMeta {
    pub name: Option<String>,
    pub details: Option<String>,
}

/// Order line: product, quantity, unit price, and the credited salesperson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub(crate) id: LineId,
    pub product_name: String,
    pub quantity: i64,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: u64,
    #[serde(default)]
    pub(crate) attribution: Option<Attribution>,
}

impl OrderLine {
    pub fn new(
        id: LineId,
        product_name: impl Into<String>,
        quantity: i64,
        unit_price: u64,
    ) -> Self {
        Self {
            id,
            product_name: product_name.into(),
            quantity,
            unit_price,
            attribution: None,
        }
    }

    pub fn line_id(&self) -> &LineId {
        &self.id
    }
}

impl Entity for OrderLine {
    type Id = LineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A point-of-sale order.
///
/// The order owns its lines. At most one line is selected at a time; the
/// selection only matters to the store-level assignment fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    /// Receipt reference shown to the customer (e.g. "Order 00004-002-0007").
    name: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    lines: Vec<OrderLine>,
    #[serde(default)]
    selected_line: Option<LineId>,
    #[serde(default)]
    customer: Option<Customer>,
    #[serde(default)]
    company: CompanyMeta,
}

impl Order {
    pub fn new(id: OrderId, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            created_at,
            lines: Vec::new(),
            selected_line: None,
            customer: None,
            company: CompanyMeta::default(),
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn set_customer(&mut self, customer: Option<Customer>) {
        self.customer = customer;
    }

    pub fn company(&self) -> &CompanyMeta {
        &self.company
    }

    pub fn set_company(&mut self, company: CompanyMeta) {
        self.company = company;
    }

    /// Append a line; the new line becomes the selected one.
    pub fn add_line(&mut self, line: OrderLine) {
        self.selected_line = Some(line.id.clone());
        self.lines.push(line);
    }

    /// Remove the line addressed by `key`. Returns the removed line, if any.
    pub fn remove_line(&mut self, key: &str) -> Option<OrderLine> {
        let idx = self.lines.iter().position(|l| l.is_addressed_by(key))?;
        let removed = self.lines.remove(idx);
        if self.selected_line.as_ref() == Some(&removed.id) {
            self.selected_line = None;
        }
        Some(removed)
    }

    /// Select the line addressed by `key`; unknown keys clear the selection.
    pub fn select_line(&mut self, key: &str) -> bool {
        self.selected_line = self.line(key).map(|l| l.id.clone());
        self.selected_line.is_some()
    }

    pub fn deselect(&mut self) {
        self.selected_line = None;
    }

    pub fn selected_line(&self) -> Option<&OrderLine> {
        let selected = self.selected_line.as_ref()?;
        self.lines.iter().find(|l| &l.id == selected)
    }

    /// Line lookup by rendered identifier (`7` and `"7"` are the same line).
    pub fn line(&self, key: &str) -> Option<&OrderLine> {
        self.lines.iter().find(|l| l.is_addressed_by(key))
    }

    pub fn line_mut(&mut self, key: &str) -> Option<&mut OrderLine> {
        self.lines.iter_mut().find(|l| l.is_addressed_by(key))
    }

    /// Set (or clear) the attribution of one line.
    ///
    /// Returns `false` without touching anything when no line is addressed by
    /// `key` (the line may have been removed meanwhile).
    pub fn set_line_attribution(
        &mut self,
        key: &str,
        person_id: Option<SalespersonId>,
        person_name: Option<&str>,
        image_ref: Option<ImageRef>,
    ) -> bool {
        match self.line_mut(key) {
            Some(line) => {
                line.set_attribution(person_id, person_name, image_ref);
                true
            }
            None => {
                tracing::debug!(
                    order_id = %self.id,
                    line_id = key,
                    "ignoring attribution for unknown line"
                );
                false
            }
        }
    }

    pub fn set_attribution_for_all(
        &mut self,
        person_id: Option<SalespersonId>,
        person_name: Option<&str>,
        image_ref: Option<ImageRef>,
    ) {
        set_attribution_for_all(self.lines.iter_mut(), person_id, person_name, image_ref);
    }

    /// Store-level assignment: the selected line, or every line when nothing is selected.
    ///
    /// Returns the number of lines written.
    pub fn assign_selected_or_all(&mut self, attribution: &Attribution) -> usize {
        // A selection naming no line (e.g. loaded from JSON) counts as none.
        let selected = self.selected_line().map(|line| line.id.clone());
        match selected {
            Some(id) => {
                let key = id.to_string();
                usize::from(self.set_line_attribution(
                    &key,
                    Some(attribution.person_id.clone()),
                    Some(&attribution.person_name),
                    attribution.image_ref.clone(),
                ))
            }
            None => {
                self.set_attribution_for_all(
                    Some(attribution.person_id.clone()),
                    Some(&attribution.person_name),
                    attribution.image_ref.clone(),
                );
                self.lines.len()
            }
        }
    }
}
