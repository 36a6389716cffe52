//! CSV Output

use crate::error::ExportError;
use crate::table::ResultTable;
use std::io::Write;

/// Write `table` as CSV: a header row, then one row per candidate.
///
/// Missing metrics are written as empty cells.
pub fn write_csv<W: Write>(table: &ResultTable, writer: W) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(table.header())?;

    for row in &table.rows {
        let mut record = Vec::with_capacity(table.metrics.len() + 2);
        record.push(row.algorithm.clone());
        record.push(row.instance.to_string());
        record.extend(
            row.values
                .iter()
                .map(|v| v.map(|v| v.to_string()).unwrap_or_default()),
        );
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Render `table` as a CSV string
pub fn generate_csv_report(table: &ResultTable) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(table, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
