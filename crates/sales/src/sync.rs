//! Persisted (wire) form of orders and the backend side of syncing them.
//!
//! Only the salesperson id is persisted per line. Names and images are display
//! data and get resolved again from the salesperson directory on reload.

use serde::{Deserialize, Serialize};

use posline_core::{Entity, LineId, OrderId, SalespersonId};

use crate::order::{Order, OrderLine};

/// Extra per-line data carried next to the host's own line fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedExtra {
    /// Always present on the wire; `null` when the line is unattributed.
    #[serde(default)]
    pub pos_salesperson_id: Option<SalespersonId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedLine {
    pub id: LineId,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: u64,
    #[serde(default)]
    pub extra_data: PersistedExtra,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedOrder {
    pub order_id: OrderId,
    pub name: String,
    pub lines: Vec<PersistedLine>,
}

impl OrderLine {
    /// Persisted form of the line: the salesperson id only.
    pub fn to_persisted(&self) -> PersistedLine {
        PersistedLine {
            id: self.id().clone(),
            product_name: self.product_name.clone(),
            quantity: self.quantity,
            unit_price: self.unit_price,
            extra_data: PersistedExtra {
                pos_salesperson_id: self.attribution().map(|a| a.person_id.clone()),
            },
        }
    }
}

impl Order {
    pub fn to_persisted(&self) -> PersistedOrder {
        PersistedOrder {
            order_id: self.id(),
            name: self.name().to_string(),
            lines: self.lines().iter().map(OrderLine::to_persisted).collect(),
        }
    }
}

/// A line as stored by the backend once the order has been processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncedLine {
    pub id: LineId,
    pub salesperson_id: Option<SalespersonId>,
}

/// Copy salesperson ids from uploaded lines onto the stored lines.
///
/// Stored lines are paired with uploaded lines by position, after ordering
/// the stored lines by id (creation order). Uploaded lines without a
/// salesperson leave the stored value alone; uploaded lines beyond the stored
/// ones are ignored. Returns the number of stored lines updated.
pub fn apply_persisted_attributions(
    stored: &mut [SyncedLine],
    uploaded: &[PersistedLine],
) -> usize {
    stored.sort_by(|a, b| a.id.cmp(&b.id));

    let mut updated = 0;
    for (stored_line, uploaded_line) in stored.iter_mut().zip(uploaded) {
        if let Some(id) = uploaded_line
            .extra_data
            .pos_salesperson_id
            .as_ref()
            .filter(|id| !id.is_blank())
        {
            stored_line.salesperson_id = Some(id.clone());
            updated += 1;
        }
    }

    if uploaded.len() > stored.len() {
        tracing::warn!(
            stored = stored.len(),
            uploaded = uploaded.len(),
            "more uploaded lines than stored lines; extra lines ignored"
        );
    }

    updated
}
