//! CSV export of visible market rows.

use super::{COLUMNS, MarketRecord};
use crate::error::Result;
use std::io::Write;
use std::path::Path;

/// Write `records` to `writer` as CSV: header row, then one row per record.
pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a MarketRecord>,
{
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(COLUMNS)?;

    let mut rows = 0;
    for record in records {
        csv.write_record(record.cells())?;
        rows += 1;
    }

    csv.flush()?;
    Ok(rows)
}

/// Export `records` to the file at `path`, returning the number of data rows.
pub fn export_csv<'a, I>(path: &Path, records: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a MarketRecord>,
{
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    let rows = write_csv(file, records)?;
    tracing::info!(path = %path.display(), rows, "exported market rows");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::FieldValue;
    use pretty_assertions::assert_eq;

    fn rows() -> Vec<MarketRecord> {
        vec![
            MarketRecord {
                item: "Sword".to_string(),
                category: "weapons".to_string(),
                price: FieldValue::from("12.5"),
                quantity: FieldValue::from(3),
                seller: "alice".to_string(),
                timestamp: "2024-01-01".to_string(),
            },
            MarketRecord {
                item: "Bread, fresh".to_string(),
                category: String::new(),
                price: FieldValue::from(0.5),
                quantity: FieldValue::from(64),
                seller: "bob".to_string(),
                timestamp: String::new(),
            },
        ]
    }

    #[test]
    fn test_two_rows_make_three_lines() {
        let mut out = Vec::new();
        let written = write_csv(&mut out, &rows()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(written, 2);
        assert_eq!(
            lines,
            vec![
                "Item,Category,Price,Quantity,Seller,Timestamp",
                "Sword,weapons,12.5,3,alice,2024-01-01",
                "\"Bread, fresh\",,0.5,64,bob,",
            ]
        );
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("market.csv");

        let written = export_csv(&path, &rows()[..1]).unwrap();

        assert_eq!(written, 1);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.starts_with("Item,Category,Price,Quantity,Seller,Timestamp"));
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let mut out = Vec::new();
        let written = write_csv(&mut out, std::iter::empty()).unwrap();
        assert_eq!(written, 0);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Item,Category,Price,Quantity,Seller,Timestamp\n"
        );
    }
}
