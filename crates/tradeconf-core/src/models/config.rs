//! Configuration structures for the extraction and export pipeline.

use serde::{Deserialize, Serialize};

use super::record::FieldName;

/// Main configuration for tradeconf.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeConfConfig {
    /// Field extraction vocabulary.
    pub extraction: ExtractionConfig,

    /// Import row export settings.
    pub export: ExportConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,
}

/// Broker name fragment and the abbreviation it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerAlias {
    /// Lowercase substring searched for in the document.
    pub name: String,
    /// Abbreviation written to the import row.
    pub code: String,
}

impl BrokerAlias {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

/// Labels and vocabularies used by the field heuristics.
///
/// All lists are ordered; earlier entries take precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Labels for the settlement amount.
    pub amount_labels: Vec<String>,

    /// Labels for the price per unit.
    pub price_labels: Vec<String>,

    /// Labels for the traded quantity.
    pub quantity_labels: Vec<String>,

    /// Labels for the commission.
    pub commission_labels: Vec<String>,

    /// Labels for the trade date.
    pub trade_date_labels: Vec<String>,

    /// Labels for the settlement date.
    pub settlement_date_labels: Vec<String>,

    /// Currency codes in priority order.
    pub currencies: Vec<String>,

    /// Broker aliases in priority order.
    pub brokers: Vec<BrokerAlias>,

    /// Number of trailing lines re-scanned for the broker name.
    pub broker_tail_lines: usize,

    /// Ticker used when none is found.
    pub default_ticker: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            amount_labels: strings(&[
                "Oppgjørsbeløp",
                "Totalt i Deres favør",
                "Oppgjørsbeløp NOK",
                "Total",
            ]),
            price_labels: strings(&["Pris", "Kurs"]),
            quantity_labels: strings(&["Antall kjøpt", "Antall solgt", "Antall"]),
            commission_labels: strings(&["Kurtasje"]),
            trade_date_labels: strings(&["Handelsdato"]),
            settlement_date_labels: strings(&["Oppgjørsdato"]),
            currencies: strings(&["EUR", "NOK", "USD", "SEK", "DKK"]),
            brokers: vec![
                BrokerAlias::new("fearnley securities", "FEAR"),
                BrokerAlias::new("fearnley", "FEAR"),
                BrokerAlias::new("sparebank 1", "SB1M"),
                BrokerAlias::new("carnegie", "DNB"),
                BrokerAlias::new("dnb", "DNB"),
                BrokerAlias::new("alfred berg", "AB"),
                BrokerAlias::new("abg", "ABG"),
                BrokerAlias::new("arctic", "ARC"),
                BrokerAlias::new("klp", "KLP"),
                BrokerAlias::new("norne", "NORNE"),
                BrokerAlias::new("pareto", "PAR"),
            ],
            broker_tail_lines: 30,
            default_ticker: "VIDEN".to_string(),
        }
    }
}

impl ExtractionConfig {
    /// Label list for a label-driven field, in priority order.
    ///
    /// Direction, sale flag, currency, broker and ticker are not found by
    /// label and return `None`.
    pub fn labels_for(&self, field: FieldName) -> Option<&[String]> {
        let labels = match field {
            FieldName::Amount => &self.amount_labels,
            FieldName::Price => &self.price_labels,
            FieldName::Quantity => &self.quantity_labels,
            FieldName::Commission => &self.commission_labels,
            FieldName::TradeDate => &self.trade_date_labels,
            FieldName::SettlementDate => &self.settlement_date_labels,
            _ => return None,
        };
        Some(labels.as_slice())
    }
}

/// Import row and CSV export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Account owner written to the first column of every row.
    pub owner: String,

    /// Default file name of the aggregated CSV.
    pub output_file: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            owner: "Petter".to_string(),
            output_file: "handelsdata_samlet.csv".to_string(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum extracted text length before a document counts as empty.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 1 }
    }
}

impl TradeConfConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
