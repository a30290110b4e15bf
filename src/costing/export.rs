use super::report::Table;
use std::io::Write;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Serializes each row's displayed text, quoting every cell.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for row in &table.rows {
        csv_writer.write_record(row.display_cells())?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv_string(table: &Table) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(table, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|err| ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))
}

pub fn export_to_path<P: AsRef<Path>>(table: &Table, path: P) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_csv(table, std::io::BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::report::{Cell, Row};

    #[test]
    fn quotes_every_cell_and_keeps_ragged_rows() {
        let mut table = Table::default();
        table.push(Row::section("Attorneys, Senior"));
        table.push(Row::columns(["Year", "Union Total"]));
        table.push(Row::data(vec![Cell::text("Year 1"), Cell::money(1_234.5)]));

        let csv = to_csv_string(&table).expect("export succeeds");
        assert_eq!(
            csv,
            "\"Attorneys, Senior\"\n\"Year\",\"Union Total\"\n\"Year 1\",\"1234.50\"\n"
        );
    }

    #[test]
    fn escapes_embedded_quotes() {
        let mut table = Table::default();
        table.push(Row::section("The \"A\" Team"));
        let csv = to_csv_string(&table).expect("export succeeds");
        assert_eq!(csv, "\"The \"\"A\"\" Team\"\n");
    }

    #[test]
    fn export_to_path_writes_the_same_csv() {
        let mut table = Table::default();
        table.push(Row::section("Clerks"));
        table.push(Row::columns(["Year", "Union Total"]));
        table.push(Row::data(vec![Cell::text("Year 1"), Cell::money(52_000.0)]));

        let path = std::env::temp_dir().join(format!(
            "contract-cost-export-{}.csv",
            std::process::id()
        ));
        export_to_path(&table, &path).expect("export writes file");

        let written = std::fs::read_to_string(&path).expect("export readable");
        std::fs::remove_file(&path).expect("export removable");
        assert_eq!(written, to_csv_string(&table).expect("export succeeds"));
        assert_eq!(written.lines().count(), 3);
    }

    #[test]
    fn export_to_missing_directory_reports_io_error() {
        let path = std::env::temp_dir()
            .join(format!("contract-cost-missing-{}", std::process::id()))
            .join("costs.csv");
        let err = export_to_path(&Table::default(), &path).expect_err("no parent directory");
        assert!(matches!(err, ExportError::Io(_)));
    }
}
