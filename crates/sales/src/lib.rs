//! Point-of-sale orders and per-line salesperson attribution.
//!
//! This crate contains the order aggregate and the attribution store,
//! implemented as deterministic domain logic (no IO, no UI, no transport).

pub mod attribution;
pub mod order;
pub mod sync;

pub use attribution::{Attribution, DisplayAttribution, ImageRef, set_attribution_for_all};
pub use order::{CompanyMeta, Customer, Order, OrderLine};
pub use sync::{
    PersistedExtra, PersistedLine, PersistedOrder, SyncedLine, apply_persisted_attributions,
};
