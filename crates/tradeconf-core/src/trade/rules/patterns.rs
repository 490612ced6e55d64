//! Common regex patterns for trade confirmation extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Separator inference: anything, then a separator and exactly two digits
    pub static ref DECIMAL_TAIL: Regex = Regex::new(
        r"^.+([.,])(\d{2})$"
    ).unwrap();

    // Any run of digits, periods and commas
    pub static ref NUMERIC_RUN: Regex = Regex::new(
        r"[\d.,]+"
    ).unwrap();

    // Loose amount candidate with a two-digit tail (e.g. 1.234,56 or 99,00)
    pub static ref AMOUNT_CANDIDATE: Regex = Regex::new(
        r"[\d.,]+\d{2}"
    ).unwrap();

    // Strict amount shape: 1-3 digits, thousand groups, two decimals
    pub static ref AMOUNT_SHAPE: Regex = Regex::new(
        r"^\d{1,3}(?:[.,]?\d{3})*(?:[.,]\d{2})$"
    ).unwrap();

    // Date-shaped text (DD.MM.YYYY or DD/MM/YYYY)
    pub static ref DATE_SHAPE: Regex = Regex::new(
        r"\d{2}[./]\d{2}[./]\d{4}"
    ).unwrap();

    // Whole-string dotted date with a four-digit year
    pub static ref DOTTED_DATE: Regex = Regex::new(
        r"^\d{1,2}\.\d{1,2}\.\d{4}$"
    ).unwrap();

    // Quantity-shaped token with optional grouping and decimals
    pub static ref QUANTITY_TOKEN: Regex = Regex::new(
        r"\b\d{1,3}(?:[.,\s]?\d{3})*(?:[.,]\d{2})?\b"
    ).unwrap();

    // ISIN-like instrument identifier somewhere in a line
    pub static ref IDENTIFIER: Regex = Regex::new(
        r"\b[A-Z]{2}\d{10}\w?\b"
    ).unwrap();

    // ISIN-like instrument identifier as a whole token
    pub static ref IDENTIFIER_TOKEN: Regex = Regex::new(
        r"^[A-Z]{2}\d{10}\w?$"
    ).unwrap();
}
