//! Salesperson selection flows.
//!
//! Two entry points share one lookup/choose step and differ only in which
//! lines receive the choice:
//!
//! - **store level** (toolbar button): the selected line, or every line of
//!   the order when nothing is selected;
//! - **line level** (the line's own menu): exactly the line the action came
//!   from.
//!
//! A failed or empty lookup produces one notification and no popup. An
//! abandoned or unusable choice changes nothing.

use serde_json::Value as JsonValue;

use posline_core::{PosConfigId, RecordKey, SalespersonId};
use posline_sales::Order;

use crate::lookup::{Candidate, CandidateLookup};

pub const SELECT_TITLE: &str = "Select Salesperson";
pub const NO_CANDIDATES_NOTICE: &str = "No salespersons configured for this POS.";
pub const LOOKUP_FAILED_NOTICE: &str = "Could not load salespersons for this POS.";

/// What the selection popup resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum UiResponse {
    /// The payload of the chosen entry, as the popup hands it back.
    Chosen(JsonValue),
    Abandoned,
}

/// Popup presenting candidates to the cashier.
#[async_trait::async_trait]
pub trait SelectionUi: Send + Sync {
    async fn present(&self, title: &str, candidates: &[Candidate]) -> UiResponse;
}

/// User-visible, non-blocking notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentOutcome {
    Assigned {
        salesperson: SalespersonId,
        lines: usize,
    },
    NoCandidates,
    LookupFailed,
    Abandoned,
    /// The line the action came from is no longer in the order.
    StaleLine,
}

/// Match a popup payload against the candidates that were offered.
///
/// Accepts either a bare id or an object with an `id` field. Anything that
/// does not name an offered candidate is rejected.
pub fn resolve_choice(payload: &JsonValue, offered: &[Candidate]) -> Option<Candidate> {
    let key = match payload {
        JsonValue::Object(map) => map.get("id").and_then(RecordKey::from_json),
        other => RecordKey::from_json(other),
    }?;
    let key = key.to_string();
    offered.iter().find(|c| c.id.matches(&key)).cloned()
}

/// Runs the lookup → popup → assignment sequence.
pub struct SalespersonPicker<L, U, N> {
    lookup: L,
    ui: U,
    notifier: N,
}

impl<L, U, N> SalespersonPicker<L, U, N>
where
    L: CandidateLookup,
    U: SelectionUi,
    N: Notifier,
{
    pub fn new(lookup: L, ui: U, notifier: N) -> Self {
        Self {
            lookup,
            ui,
            notifier,
        }
    }

    /// Fetch candidates and let the cashier pick one.
    pub async fn choose(
        &self,
        config_id: Option<&PosConfigId>,
    ) -> Result<Candidate, AssignmentOutcome> {
        let candidates = match self.lookup.candidates(config_id).await {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::warn!(error = %err, "salesperson lookup failed");
                self.notifier.notify(LOOKUP_FAILED_NOTICE);
                return Err(AssignmentOutcome::LookupFailed);
            }
        };

        if candidates.is_empty() {
            tracing::info!(
                config_id = ?config_id.map(ToString::to_string),
                "no salespersons configured"
            );
            self.notifier.notify(NO_CANDIDATES_NOTICE);
            return Err(AssignmentOutcome::NoCandidates);
        }

        match self.ui.present(SELECT_TITLE, &candidates).await {
            UiResponse::Chosen(payload) => match resolve_choice(&payload, &candidates) {
                Some(choice) => Ok(choice),
                None => {
                    tracing::warn!(%payload, "selection payload names no offered salesperson");
                    Err(AssignmentOutcome::Abandoned)
                }
            },
            UiResponse::Abandoned => {
                tracing::debug!("salesperson selection abandoned");
                Err(AssignmentOutcome::Abandoned)
            }
        }
    }

    /// Store-level entry point: selected line, else all lines.
    pub async fn assign_from_store(
        &self,
        order: &mut Order,
        config_id: Option<&PosConfigId>,
    ) -> AssignmentOutcome {
        let choice = match self.choose(config_id).await {
            Ok(choice) => choice,
            Err(outcome) => return outcome,
        };

        let lines = order.assign_selected_or_all(&choice.to_attribution());
        tracing::info!(
            order_id = %order.id(),
            salesperson = %choice.id,
            lines,
            "salesperson assigned"
        );
        AssignmentOutcome::Assigned {
            salesperson: choice.id,
            lines,
        }
    }

    /// Line-level entry point: only the line addressed by `line_key`.
    pub async fn assign_from_line(
        &self,
        order: &mut Order,
        line_key: &str,
        config_id: Option<&PosConfigId>,
    ) -> AssignmentOutcome {
        let choice = match self.choose(config_id).await {
            Ok(choice) => choice,
            Err(outcome) => return outcome,
        };

        // The popup is asynchronous; the line may be gone by now.
        if order.set_line_attribution(
            line_key,
            Some(choice.id.clone()),
            Some(&choice.name),
            choice.image_ref.clone(),
        ) {
            tracing::info!(
                order_id = %order.id(),
                line_id = line_key,
                salesperson = %choice.id,
                "salesperson assigned"
            );
            AssignmentOutcome::Assigned {
                salesperson: choice.id,
                lines: 1,
            }
        } else {
            AssignmentOutcome::StaleLine
        }
    }
}

/// Clear the attribution of the line addressed by `line_key`.
pub fn remove_from_line(order: &mut Order, line_key: &str) -> bool {
    order.set_line_attribution(line_key, None, None, None)
}
