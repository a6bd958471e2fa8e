//! Shared domain building blocks for the posline crates.
//!
//! This crate contains **pure domain** primitives (no IO, no UI, no transport).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::DomainError;
pub use id::{LineId, OrderId, PosConfigId, RecordKey, SalespersonId};
pub use value_object::ValueObject;
