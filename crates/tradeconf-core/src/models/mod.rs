//! Data models for extracted trades, corrections and configuration.

pub mod config;
pub mod record;

pub use config::{BrokerAlias, ExportConfig, ExtractionConfig, PdfConfig, TradeConfConfig};
pub use record::{CorrectionBook, Direction, FieldCorrection, FieldName, FieldRecord};
