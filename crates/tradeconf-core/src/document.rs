//! Documents as ordered line sequences.

use std::path::Path;

use tracing::debug;

use crate::error::{Result, TradeConfError};
use crate::pdf::PdfExtractor;

/// One uploaded confirmation: a stable id and its text lines in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Stable identifier (the file name for files on disk).
    pub id: String,
    /// Text lines across all pages, in page order.
    pub lines: Vec<String>,
}

impl Document {
    pub fn new(id: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            id: id.into(),
            lines,
        }
    }

    /// Document from already-extracted text.
    pub fn from_text(id: impl Into<String>, text: &str) -> Self {
        Self::new(id, text.lines().map(str::to_string).collect())
    }

    /// Document from PDF bytes.
    pub fn from_pdf(id: impl Into<String>, data: &[u8]) -> Result<Self> {
        let lines = PdfExtractor::from_bytes(data)?.extract_lines()?;
        Ok(Self::new(id, lines))
    }

    /// Load a `.pdf` or `.txt` file; the id is the file name.
    pub fn open(path: &Path) -> Result<Self> {
        let id = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("document")
            .to_string();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        debug!("Opening {} as {:?}", path.display(), extension);

        match extension.as_str() {
            "pdf" => Self::from_pdf(id, &std::fs::read(path)?),
            "txt" => Ok(Self::from_text(id, &std::fs::read_to_string(path)?)),
            _ => Err(TradeConfError::Config(format!(
                "unsupported file format: {}",
                path.display()
            ))),
        }
    }

    /// Total number of characters across lines.
    pub fn text_len(&self) -> usize {
        self.lines.iter().map(|l| l.trim().chars().count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_keeps_order_and_blank_lines() {
        let doc = Document::from_text("a.txt", "first\r\n\nthird\n");
        assert_eq!(doc.lines, vec!["first", "", "third"]);
        assert_eq!(doc.text_len(), 10);
    }

    #[test]
    fn test_open_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sluttseddel.txt");
        std::fs::write(&path, "Kurtasje 29,00\n").unwrap();

        let doc = Document::open(&path).unwrap();
        assert_eq!(doc.id, "sluttseddel.txt");
        assert_eq!(doc.lines, vec!["Kurtasje 29,00"]);
    }

    #[test]
    fn test_open_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, [0u8; 4]).unwrap();

        assert!(matches!(Document::open(&path), Err(TradeConfError::Config(_))));
    }
}
