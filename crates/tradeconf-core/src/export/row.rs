//! Fixed-position import rows.

use chrono::NaiveDate;
use tracing::trace;

use crate::models::config::ExportConfig;
use crate::models::record::{FieldName, FieldRecord};
use crate::trade::rules::patterns::DOTTED_DATE;

/// One import row; always [`ROW_LEN`] cells.
pub type OutputRow = Vec<String>;

/// Number of cells in an import row.
pub const ROW_LEN: usize = 103;

/// Position of the account owner.
pub const OWNER_POSITION: usize = 0;

/// Constant cells of the import schema.
pub const LITERAL_CELLS: [(usize, &str); 11] = [
    (3, "csno"),
    (11, "cano"),
    (12, "$cash"),
    (16, "y"),
    (21, "5"),
    (25, "n"),
    (28, "n"),
    (29, "1"),
    (41, "1"),
    (44, "n"),
    (45, "y"),
];

/// Cells filled from the record.
pub const FIELD_CELLS: [(usize, FieldName); 9] = [
    (1, FieldName::Direction),
    (4, FieldName::Ticker),
    (5, FieldName::TradeDate),
    (6, FieldName::SettlementDate),
    (8, FieldName::Quantity),
    (9, FieldName::SaleFlag),
    (17, FieldName::Amount),
    (23, FieldName::Commission),
    (77, FieldName::Broker),
];

/// Reformat `DD.MM.YYYY` or `DDMMYYYY` as `MMDDYYYY`.
///
/// Anything else, including two-digit years and impossible calendar dates,
/// is returned as is.
pub fn format_date(value: &str) -> String {
    let parsed = if DOTTED_DATE.is_match(value) {
        NaiveDate::parse_from_str(value, "%d.%m.%Y").ok()
    } else if value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()) {
        NaiveDate::parse_from_str(value, "%d%m%Y").ok()
    } else {
        None
    };

    match parsed {
        Some(date) => date.format("%m%d%Y").to_string(),
        None => {
            trace!("Leaving date {:?} unformatted", value);
            value.to_string()
        }
    }
}

/// Builds import rows from (corrected) field records.
#[derive(Debug, Clone)]
pub struct RowBuilder {
    owner: String,
}

impl RowBuilder {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(config.owner.clone())
    }

    /// Map a record onto the import schema. Performs no validation.
    pub fn build(&self, record: &FieldRecord) -> OutputRow {
        let mut row = vec![String::new(); ROW_LEN];
        row[OWNER_POSITION] = self.owner.clone();

        for (position, literal) in LITERAL_CELLS {
            row[position] = literal.to_string();
        }

        for (position, name) in FIELD_CELLS {
            let value = record.get(name);
            row[position] = match name {
                FieldName::TradeDate | FieldName::SettlementDate => format_date(value),
                _ => value.to_string(),
            };
        }

        row
    }
}

impl Default for RowBuilder {
    fn default() -> Self {
        Self::from_config(&ExportConfig::default())
    }
}
