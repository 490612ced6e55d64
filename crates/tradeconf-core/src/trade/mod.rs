//! Trade confirmation field extraction module.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, TradeParser};

use crate::models::record::FieldRecord;

/// Trait for trade confirmation parsers.
///
/// Parsing is total: unresolved fields come back empty instead of failing.
pub trait ConfirmationParser {
    /// Resolve the fields of one document from its ordered lines.
    fn resolve<S: AsRef<str>>(&self, lines: &[S]) -> FieldRecord;

    /// Resolve the fields of one document from plain text.
    fn parse(&self, text: &str) -> ExtractionResult;
}
