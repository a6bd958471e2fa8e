//! Receipt export: the data record handed to the print/display layer.
//!
//! The host computes a base export for every order; this crate extends it
//! with cleaned company header text, customer details and the salespersons
//! credited on the order's lines. Extension is additive only: keys the host
//! already set are never removed, renamed or overwritten.

pub mod export;
pub mod finalize;
pub mod markup;
pub mod projector;

pub use export::{BaseExport, HEADER_KEY, ReceiptExport, ReceiptHeader};
pub use finalize::{CustomerDetails, FinalizedReceipt, finalize};
pub use markup::strip_markup;
pub use projector::{collect_salespersons, project};
