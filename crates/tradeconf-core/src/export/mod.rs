//! Import row export.

pub mod row;

pub use row::{OutputRow, ROW_LEN, RowBuilder, format_date};

use std::io::Write;

/// Write rows as header-less, comma-separated UTF-8 CSV.
pub fn write_csv<W: Write>(writer: W, rows: &[OutputRow]) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for row in rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}
