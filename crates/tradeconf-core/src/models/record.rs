//! Extracted trade fields and the manual corrections applied to them.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TradeConfError};

/// Trade direction as written to the import row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Bought ("kjøpt").
    #[serde(rename = "by")]
    Bought,
    /// Sold ("solgt").
    #[serde(rename = "sl")]
    Sold,
}

impl Direction {
    /// Two-letter import code.
    pub fn code(self) -> &'static str {
        match self {
            Direction::Bought => "by",
            Direction::Sold => "sl",
        }
    }

    /// Parse an import code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "by" => Some(Direction::Bought),
            "sl" => Some(Direction::Sold),
            _ => None,
        }
    }

    /// Sale marker that accompanies this direction.
    pub fn sale_flag(self) -> &'static str {
        match self {
            Direction::Bought => "",
            Direction::Sold => "f",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Names of the fields in a [`FieldRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Direction,
    SaleFlag,
    TradeDate,
    SettlementDate,
    Quantity,
    Price,
    Currency,
    Amount,
    Commission,
    Broker,
    Ticker,
}

impl FieldName {
    /// Every field, in display order.
    pub const ALL: [FieldName; 11] = [
        FieldName::Direction,
        FieldName::SaleFlag,
        FieldName::TradeDate,
        FieldName::SettlementDate,
        FieldName::Quantity,
        FieldName::Price,
        FieldName::Currency,
        FieldName::Amount,
        FieldName::Commission,
        FieldName::Broker,
        FieldName::Ticker,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Direction => "direction",
            FieldName::SaleFlag => "sale_flag",
            FieldName::TradeDate => "trade_date",
            FieldName::SettlementDate => "settlement_date",
            FieldName::Quantity => "quantity",
            FieldName::Price => "price",
            FieldName::Currency => "currency",
            FieldName::Amount => "amount",
            FieldName::Commission => "commission",
            FieldName::Broker => "broker",
            FieldName::Ticker => "ticker",
        }
    }

    /// Whether the field holds a canonical number.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            FieldName::Quantity | FieldName::Price | FieldName::Amount | FieldName::Commission
        )
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("unknown field: {}", s))
    }
}

/// Fields extracted from one trade confirmation.
///
/// Every value is a string; unresolved fields are empty. Numeric fields hold
/// a canonical decimal (`4550.0`) when parsing succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldRecord {
    /// "by", "sl" or empty.
    pub direction: String,
    /// "f" for sales, otherwise empty.
    pub sale_flag: String,
    /// Trade date as found in the document.
    pub trade_date: String,
    /// Settlement date as found in the document.
    pub settlement_date: String,
    pub quantity: String,
    pub price: String,
    pub currency: String,
    /// Settlement amount.
    pub amount: String,
    pub commission: String,
    /// Broker abbreviation.
    pub broker: String,
    pub ticker: String,
}

impl FieldRecord {
    /// Value of a field by name.
    pub fn get(&self, name: FieldName) -> &str {
        match name {
            FieldName::Direction => &self.direction,
            FieldName::SaleFlag => &self.sale_flag,
            FieldName::TradeDate => &self.trade_date,
            FieldName::SettlementDate => &self.settlement_date,
            FieldName::Quantity => &self.quantity,
            FieldName::Price => &self.price,
            FieldName::Currency => &self.currency,
            FieldName::Amount => &self.amount,
            FieldName::Commission => &self.commission,
            FieldName::Broker => &self.broker,
            FieldName::Ticker => &self.ticker,
        }
    }

    /// Overwrite a field by name.
    pub fn set(&mut self, name: FieldName, value: impl Into<String>) {
        let value = value.into();
        match name {
            FieldName::Direction => self.direction = value,
            FieldName::SaleFlag => self.sale_flag = value,
            FieldName::TradeDate => self.trade_date = value,
            FieldName::SettlementDate => self.settlement_date = value,
            FieldName::Quantity => self.quantity = value,
            FieldName::Price => self.price = value,
            FieldName::Currency => self.currency = value,
            FieldName::Amount => self.amount = value,
            FieldName::Commission => self.commission = value,
            FieldName::Broker => self.broker = value,
            FieldName::Ticker => self.ticker = value,
        }
    }

    /// Parsed direction, if the field holds a valid code.
    pub fn direction(&self) -> Option<Direction> {
        Direction::from_code(&self.direction)
    }

    /// Set the direction together with its derived sale flag.
    pub fn set_direction(&mut self, direction: Option<Direction>) {
        self.direction = direction.map(|d| d.code().to_string()).unwrap_or_default();
        self.sale_flag = direction.map(|d| d.sale_flag().to_string()).unwrap_or_default();
    }

    /// Fields that are still empty.
    pub fn missing_fields(&self) -> Vec<FieldName> {
        FieldName::ALL
            .into_iter()
            .filter(|name| *name != FieldName::SaleFlag && self.get(*name).is_empty())
            .collect()
    }

    /// Apply manual overrides.
    ///
    /// A direction override re-derives the sale flag unless the correction
    /// also sets the sale flag.
    pub fn apply(&mut self, correction: &FieldCorrection) {
        if let Some(direction) = correction.direction {
            self.set_direction(Some(direction));
        }

        let overrides = [
            (FieldName::SaleFlag, &correction.sale_flag),
            (FieldName::TradeDate, &correction.trade_date),
            (FieldName::SettlementDate, &correction.settlement_date),
            (FieldName::Quantity, &correction.quantity),
            (FieldName::Price, &correction.price),
            (FieldName::Currency, &correction.currency),
            (FieldName::Amount, &correction.amount),
            (FieldName::Commission, &correction.commission),
            (FieldName::Broker, &correction.broker),
            (FieldName::Ticker, &correction.ticker),
        ];

        for (name, value) in overrides {
            if let Some(value) = value {
                self.set(name, value.clone());
            }
        }
    }
}

/// Manual overrides for one document.
///
/// The direction can only be one of the two import codes; every other field
/// is free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldCorrection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_flag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
}

impl FieldCorrection {
    /// A complete review template pre-filled with the resolved values.
    pub fn from_record(record: &FieldRecord) -> Self {
        Self {
            direction: record.direction(),
            sale_flag: Some(record.sale_flag.clone()),
            trade_date: Some(record.trade_date.clone()),
            settlement_date: Some(record.settlement_date.clone()),
            quantity: Some(record.quantity.clone()),
            price: Some(record.price.clone()),
            currency: Some(record.currency.clone()),
            amount: Some(record.amount.clone()),
            commission: Some(record.commission.clone()),
            broker: Some(record.broker.clone()),
            ticker: Some(record.ticker.clone()),
        }
    }

    /// Whether the correction overrides nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Corrections for a batch of documents, keyed by document id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrectionBook {
    entries: BTreeMap<String, FieldCorrection>,
}

impl CorrectionBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load corrections from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| TradeConfError::Corrections(format!("{}: {}", path.display(), e)))
    }

    /// Save corrections to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| TradeConfError::Corrections(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Correction for a document, if any.
    pub fn get(&self, document_id: &str) -> Option<&FieldCorrection> {
        self.entries.get(document_id)
    }

    /// Store the correction for a document, replacing any previous one.
    pub fn insert(&mut self, document_id: impl Into<String>, correction: FieldCorrection) {
        self.entries.insert(document_id.into(), correction);
    }

    /// Document ids with a correction.
    pub fn document_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
