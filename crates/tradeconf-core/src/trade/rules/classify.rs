//! Non-numeric field detectors: direction, currency, broker and ticker.

use tracing::trace;

use crate::models::config::{BrokerAlias, ExtractionConfig};
use crate::models::record::Direction;

use super::FieldExtractor;
use super::patterns::{IDENTIFIER, IDENTIFIER_TOKEN};

const BOUGHT_KEYWORD: &str = "kjøpt";
const SOLD_KEYWORD: &str = "solgt";

/// Buy/sell detector.
///
/// Matches the keywords anywhere in a line, which includes labels such as
/// "Antall kjøpt". A bought keyword wins over a sold keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectionExtractor;

impl DirectionExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for DirectionExtractor {
    type Output = Direction;

    fn extract<S: AsRef<str>>(&self, lines: &[S]) -> Option<Direction> {
        let lowered: Vec<String> = lines.iter().map(|l| l.as_ref().to_lowercase()).collect();

        if lowered.iter().any(|l| l.contains(BOUGHT_KEYWORD)) {
            Some(Direction::Bought)
        } else if lowered.iter().any(|l| l.contains(SOLD_KEYWORD)) {
            Some(Direction::Sold)
        } else {
            None
        }
    }
}

/// Currency detector over a fixed, ordered vocabulary.
#[derive(Debug, Clone)]
pub struct CurrencyExtractor {
    currencies: Vec<String>,
}

impl CurrencyExtractor {
    pub fn new(currencies: Vec<String>) -> Self {
        Self { currencies }
    }
}

impl Default for CurrencyExtractor {
    fn default() -> Self {
        Self::new(ExtractionConfig::default().currencies)
    }
}

impl FieldExtractor for CurrencyExtractor {
    type Output = String;

    /// First line mentioning any currency wins; within a line the
    /// vocabulary order decides.
    fn extract<S: AsRef<str>>(&self, lines: &[S]) -> Option<String> {
        lines.iter().find_map(|line| {
            let line = line.as_ref().to_lowercase();
            self.currencies
                .iter()
                .find(|code| line.contains(&code.to_lowercase()))
                .map(|code| code.to_uppercase())
        })
    }
}

/// Broker abbreviation detector.
#[derive(Debug, Clone)]
pub struct BrokerExtractor {
    brokers: Vec<BrokerAlias>,
    tail_lines: usize,
}

impl BrokerExtractor {
    pub fn new(brokers: Vec<BrokerAlias>) -> Self {
        Self {
            brokers,
            tail_lines: 30,
        }
    }

    /// Set how many trailing lines are appended for the second pass.
    pub fn with_tail_lines(mut self, tail_lines: usize) -> Self {
        self.tail_lines = tail_lines;
        self
    }
}

impl Default for BrokerExtractor {
    fn default() -> Self {
        let config = ExtractionConfig::default();
        Self::new(config.brokers).with_tail_lines(config.broker_tail_lines)
    }
}

impl FieldExtractor for BrokerExtractor {
    type Output = String;

    /// Scans the full text followed by the document tail; the first alias in
    /// declaration order that occurs anywhere wins.
    fn extract<S: AsRef<str>>(&self, lines: &[S]) -> Option<String> {
        let all: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
        let tail_start = all.len().saturating_sub(self.tail_lines);
        let haystack = format!("{}\n{}", all.join("\n"), all[tail_start..].join("\n")).to_lowercase();

        self.brokers
            .iter()
            .find(|alias| haystack.contains(&alias.name.to_lowercase()))
            .map(|alias| {
                trace!("Broker alias {:?} -> {}", alias.name, alias.code);
                alias.code.clone()
            })
    }
}

/// Ticker symbol detector.
#[derive(Debug, Clone)]
pub struct TickerExtractor {
    default_ticker: String,
}

impl TickerExtractor {
    pub fn new(default_ticker: impl Into<String>) -> Self {
        Self {
            default_ticker: default_ticker.into(),
        }
    }

    /// Ticker from the document, or the configured default symbol.
    pub fn extract_or_default<S: AsRef<str>>(&self, lines: &[S]) -> String {
        self.extract(lines)
            .unwrap_or_else(|| self.default_ticker.clone())
    }

    fn from_ticker_line<S: AsRef<str>>(lines: &[S]) -> Option<String> {
        lines.iter().map(AsRef::as_ref).find_map(|line| {
            if !line.to_lowercase().contains("ticker") {
                return None;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() >= 2 {
                tokens.last().map(|t| t.to_uppercase())
            } else {
                None
            }
        })
    }

    fn from_identifier_line<S: AsRef<str>>(lines: &[S]) -> Option<String> {
        lines
            .iter()
            .map(AsRef::as_ref)
            .filter(|line| IDENTIFIER.is_match(line))
            .find_map(|line| {
                let tokens: Vec<&str> = line.split_whitespace().collect();
                tokens.windows(2).find_map(|pair| {
                    let candidate = pair[1];
                    let len = candidate.chars().count();
                    if IDENTIFIER_TOKEN.is_match(pair[0])
                        && (2..=6).contains(&len)
                        && candidate.chars().all(char::is_alphanumeric)
                    {
                        Some(candidate.to_uppercase())
                    } else {
                        None
                    }
                })
            })
    }
}

impl Default for TickerExtractor {
    fn default() -> Self {
        Self::new(ExtractionConfig::default().default_ticker)
    }
}

impl FieldExtractor for TickerExtractor {
    type Output = String;

    /// An explicit "ticker" line first, then the token after an identifier.
    fn extract<S: AsRef<str>>(&self, lines: &[S]) -> Option<String> {
        Self::from_ticker_line(lines).or_else(|| Self::from_identifier_line(lines))
    }
}
