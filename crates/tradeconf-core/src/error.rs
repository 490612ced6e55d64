//! Error types for the tradeconf-core library.
//!
//! Field extraction itself never fails; these errors only cover the edges
//! where documents, configuration and correction files are read.

use thiserror::Error;

/// Main error type for the tradeconf library.
#[derive(Error, Debug)]
pub enum TradeConfError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Corrections file could not be read or written.
    #[error("corrections error: {0}")]
    Corrections(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Result type for the tradeconf library.
pub type Result<T> = std::result::Result<T, TradeConfError>;
