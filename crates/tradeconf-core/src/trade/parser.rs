//! Document field resolver combining label lookups, fallbacks and classifiers.

use std::time::Instant;

use tracing::{debug, info};

use crate::document::Document;
use crate::models::config::ExtractionConfig;
use crate::models::record::{FieldName, FieldRecord};

use super::ConfirmationParser;
use super::rules::{
    BrokerExtractor, CurrencyExtractor, DecimalSeparator, DirectionExtractor, FieldExtractor,
    TickerExtractor, amount_fallback, find_by_label, find_labelled, infer_separator, normalize,
    quantity_fallback, reconstruct_from_identifier,
};

/// Result of resolving one document.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Resolved fields.
    pub record: FieldRecord,
    /// Decimal separator inferred from the settlement amount.
    pub separator: DecimalSeparator,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Rule-based trade confirmation parser.
pub struct TradeParser {
    config: ExtractionConfig,
    direction: DirectionExtractor,
    currency: CurrencyExtractor,
    broker: BrokerExtractor,
    ticker: TickerExtractor,
}

impl TradeParser {
    /// Create a parser with the default Norwegian vocabulary.
    pub fn new() -> Self {
        Self::with_config(ExtractionConfig::default())
    }

    /// Create a parser from an extraction configuration.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self {
            direction: DirectionExtractor::new(),
            currency: CurrencyExtractor::new(config.currencies.clone()),
            broker: BrokerExtractor::new(config.brokers.clone())
                .with_tail_lines(config.broker_tail_lines),
            ticker: TickerExtractor::new(config.default_ticker.clone()),
            config,
        }
    }

    /// The active extraction configuration.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Resolve a loaded document.
    pub fn resolve_document(&self, document: &Document) -> ExtractionResult {
        info!("Resolving {} ({} lines)", document.id, document.lines.len());
        let result = self.resolve_lines(document.lines.as_slice());

        for warning in &result.warnings {
            debug!("{}: {}", document.id, warning);
        }
        debug!("Resolved {} in {}ms", document.id, result.processing_time_ms);

        result
    }

    fn resolve_lines<S: AsRef<str>>(&self, lines: &[S]) -> ExtractionResult {
        let start = Instant::now();
        let mut record = FieldRecord::default();

        // Direction and derived sale flag
        record.set_direction(self.direction.extract(lines));

        // Settlement amount decides the decimal separator for the document
        let raw_amount = match find_labelled(lines, &self.config.amount_labels) {
            Some(found) => {
                debug!(
                    "Amount label {:?} on line {:?}: {:?}",
                    found.label, found.line, found.source
                );
                found.value
            }
            None => {
                let fallback = amount_fallback(lines);
                debug!("No amount label found, fallback gave {:?}", fallback);
                fallback
            }
        };
        let separator = infer_separator(&raw_amount);
        record.amount = normalize(&raw_amount, separator);
        debug!("Amount {:?} -> {:?} (separator {})", raw_amount, record.amount, separator);

        record.price = normalize(&find_by_label(lines, &self.config.price_labels), separator);
        record.quantity = normalize(
            &quantity_fallback(lines, &self.config.quantity_labels),
            separator,
        );
        record.commission = normalize(
            &find_by_label(lines, &self.config.commission_labels),
            separator,
        );

        if record.quantity.is_empty() || record.price.is_empty() {
            if let Some(rebuilt) = reconstruct_from_identifier(lines, separator) {
                record.quantity = rebuilt.quantity;
                record.price = rebuilt.price;
            }
        }

        record.trade_date = find_by_label(lines, &self.config.trade_date_labels);
        record.settlement_date = find_by_label(lines, &self.config.settlement_date_labels);

        record.currency = self.currency.extract(lines).unwrap_or_default();
        record.broker = self.broker.extract(lines).unwrap_or_default();
        record.ticker = self.ticker.extract_or_default(lines);

        let warnings: Vec<String> = record
            .missing_fields()
            .into_iter()
            .map(|name| format!("Could not extract {}", name))
            .chain(
                [FieldName::Quantity, FieldName::Price, FieldName::Amount, FieldName::Commission]
                    .into_iter()
                    .filter(|name| {
                        let value = record.get(*name);
                        !value.is_empty() && value.parse::<f64>().is_err()
                    })
                    .map(|name| format!("{} is not a number: {}", name, record.get(name))),
            )
            .collect();

        debug!(
            "Resolved fields: direction={:?} quantity={:?} price={:?} amount={:?} broker={:?} ticker={:?}",
            record.direction, record.quantity, record.price, record.amount, record.broker, record.ticker
        );

        ExtractionResult {
            record,
            separator,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl Default for TradeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmationParser for TradeParser {
    fn resolve<S: AsRef<str>>(&self, lines: &[S]) -> FieldRecord {
        self.resolve_lines(lines).record
    }

    fn parse(&self, text: &str) -> ExtractionResult {
        let lines: Vec<&str> = text.lines().collect();
        self.resolve_lines(lines.as_slice())
    }
}
