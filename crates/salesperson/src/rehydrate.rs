//! Restore display attributions on a reloaded order.
//!
//! Persisted lines only carry the salesperson id; names and images are
//! looked up again among the till's candidates.

use posline_core::PosConfigId;
use posline_sales::{Order, PersistedLine};

use crate::lookup::{Candidate, CandidateLookup, LookupError};

/// Re-resolve persisted salesperson ids against `candidates`.
///
/// Lines absent from `order` are skipped. A null id, or one that no longer
/// resolves, leaves the line unattributed. Returns the number of lines that
/// got an attribution back.
pub fn rehydrate(
    order: &mut Order,
    persisted: &[PersistedLine],
    candidates: &[Candidate],
) -> usize {
    let mut restored = 0;
    for line in persisted {
        let key = line.id.to_string();
        let resolved = line
            .extra_data
            .pos_salesperson_id
            .as_ref()
            .and_then(|id| {
                let id_key = id.to_string();
                let found = candidates.iter().find(|c| c.id.matches(&id_key));
                if found.is_none() {
                    tracing::warn!(
                        line_id = %key,
                        salesperson = %id_key,
                        "persisted salesperson no longer resolves"
                    );
                }
                found
            });

        let Some(target) = order.line_mut(&key) else {
            continue;
        };
        match resolved {
            Some(candidate) => {
                target.attribute(candidate.to_attribution());
                restored += 1;
            }
            None => target.clear_attribution(),
        }
    }
    restored
}

/// Fetch the till's candidates, then [`rehydrate`].
pub async fn rehydrate_with_lookup<L>(
    order: &mut Order,
    persisted: &[PersistedLine],
    config_id: Option<&PosConfigId>,
    lookup: &L,
) -> Result<usize, LookupError>
where
    L: CandidateLookup + ?Sized,
{
    let candidates = lookup.candidates(config_id).await?;
    Ok(rehydrate(order, persisted, &candidates))
}
