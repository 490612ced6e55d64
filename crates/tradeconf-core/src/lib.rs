//! Core library for trade confirmation processing.
//!
//! This crate provides:
//! - PDF text extraction into ordered line sequences
//! - Heuristic field extraction (amounts, quantities, prices, dates,
//!   currency, broker, direction, ticker)
//! - Per-document manual corrections
//! - Fixed-position import rows for downstream CSV export

pub mod document;
pub mod error;
pub mod export;
pub mod models;
pub mod pdf;
pub mod trade;

pub use document::Document;
pub use error::{Result, TradeConfError};
pub use export::{OutputRow, RowBuilder, format_date, write_csv};
pub use models::config::TradeConfConfig;
pub use models::record::{CorrectionBook, Direction, FieldCorrection, FieldName, FieldRecord};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use trade::{ConfirmationParser, ExtractionResult, TradeParser};
pub use trade::rules::{DecimalSeparator, find_by_label, infer_separator, normalize};
