//! Configuration: per-till POS settings and process settings.

pub mod app;
pub mod pos;

pub use app::{AppConfig, ConfigError, LogFormat, LoggingConfig};
pub use pos::{PosConfig, ReceiptLogo};
