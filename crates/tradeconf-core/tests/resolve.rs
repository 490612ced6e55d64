//! End-to-end resolution of confirmations into import rows.

use pretty_assertions::assert_eq;

use tradeconf_core::export::row::{FIELD_CELLS, ROW_LEN};
use tradeconf_core::{
    ConfirmationParser, CorrectionBook, Direction, Document, FieldCorrection, FieldName,
    RowBuilder, TradeParser, write_csv,
};

const DNB_CONFIRMATION: &str = "\
Handelsdato 01.03.2024
Oppgjørsdato 05.03.2024
Antall kjøpt 100
Pris 45,50
Oppgjørsbeløp NOK 4.550,00
Kurtasje 29,00
DNB Markets
NO0010000000 EQUI";

#[test]
fn resolves_labelled_confirmation() {
    let document = Document::from_text("dnb.txt", DNB_CONFIRMATION);
    let result = TradeParser::new().resolve_document(&document);
    let record = result.record;

    // "Antall kjøpt" is a label, but the keyword scan still sees "kjøpt"
    assert_eq!(record.direction, "by");
    assert_eq!(record.quantity, "100.0");
    assert_eq!(record.price, "45.5");
    assert_eq!(record.amount, "4550.0");
    assert_eq!(record.commission, "29.0");
    assert_eq!(record.currency, "NOK");
    assert_eq!(record.broker, "DNB");
    assert_eq!(record.ticker, "EQUI");
}

#[test]
fn numeric_fields_are_canonical() {
    let record = TradeParser::new().parse(DNB_CONFIRMATION).record;

    for name in FieldName::ALL.into_iter().filter(|n| n.is_numeric()) {
        let value = record.get(name);
        assert!(value.is_empty() || value.parse::<f64>().is_ok(), "{} = {:?}", name, value);
    }
}

#[test]
fn corrected_record_reaches_the_row() {
    let document = Document::from_text("dnb.txt", DNB_CONFIRMATION);
    let mut record = TradeParser::new().resolve_document(&document).record;

    let mut book = CorrectionBook::new();
    book.insert(
        "dnb.txt",
        FieldCorrection {
            direction: Some(Direction::Sold),
            ticker: Some("DNB".to_string()),
            ..Default::default()
        },
    );

    if let Some(correction) = book.get(&document.id) {
        record.apply(correction);
    }

    let row = RowBuilder::default().build(&record);
    assert_eq!(row.len(), ROW_LEN);
    assert_eq!(row[1], "sl");
    assert_eq!(row[4], "DNB");
    assert_eq!(row[5], "03012024");
    assert_eq!(row[6], "03052024");
    assert_eq!(row[9], "f");
    assert_eq!(row[17], "4550.0");
}

#[test]
fn empty_document_still_builds_a_row() {
    let record = TradeParser::new().parse("").record;
    let row = RowBuilder::default().build(&record);

    assert_eq!(row.len(), ROW_LEN);
    for (position, name) in FIELD_CELLS {
        if name != FieldName::Ticker {
            assert_eq!(row[position], "", "position {}", position);
        }
    }
    assert_eq!(row[4], "VIDEN");
}

#[test]
fn batch_rows_serialize_in_input_order() {
    let parser = TradeParser::new();
    let builder = RowBuilder::default();
    let documents = [
        Document::from_text("a.txt", DNB_CONFIRMATION),
        Document::from_text("b.txt", "Du har solgt\nTotal 1,000.00 USD\nPareto"),
    ];

    let rows: Vec<_> = documents
        .iter()
        .map(|doc| builder.build(&parser.resolve_document(doc).record))
        .collect();

    let mut out = Vec::new();
    write_csv(&mut out, &rows).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Petter,by,,csno,EQUI,03012024,03052024,,100.0,,"));
    // Without a quantity label the positional fallback takes the first number
    assert!(lines[1].starts_with("Petter,sl,,csno,VIDEN,,,,1000.0,f,"));
}
