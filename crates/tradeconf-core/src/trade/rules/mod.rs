//! Rule-based field extractors for trade confirmations.

pub mod classify;
pub mod fallback;
pub mod labels;
pub mod numbers;
pub mod patterns;

pub use classify::{BrokerExtractor, CurrencyExtractor, DirectionExtractor, TickerExtractor};
pub use fallback::{amount_fallback, quantity_fallback, reconstruct_from_identifier};
pub use labels::{find_by_label, find_labelled};
pub use numbers::{DecimalSeparator, Normalized, canonical, infer_separator, normalize, normalize_value};

/// Trait for field extractors working on a document's lines.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from the line sequence.
    fn extract<S: AsRef<str>>(&self, lines: &[S]) -> Option<Self::Output>;
}

/// An extracted value together with where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Index of the source line.
    pub line: Option<usize>,
    /// Label that located the value, if any.
    pub label: Option<String>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            line: None,
            label: None,
            source: source.into(),
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
