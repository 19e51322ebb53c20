use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{InventoryDataset, Record};

/// Columns every inventory file must carry. Anything else is ignored.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Date",
    "Region",
    "Category",
    "Store ID",
    "Units Sold",
    "Inventory Level",
];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV missing '{0}' column")]
    MissingColumn(&'static str),

    #[error("reading CSV headers: {0}")]
    Header(#[source] csv::Error),

    #[error("CSV line {line}: {source}")]
    Row {
        line: u64,
        #[source]
        source: csv::Error,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load an inventory dataset from a CSV file.
pub fn load_file(path: &Path) -> Result<InventoryDataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_reader(file)
}

/// Load an inventory dataset from any CSV source.
///
/// Expected header (order free, extra columns allowed):
///
/// ```text
/// Date,Region,Category,Store ID,Units Sold,Inventory Level
/// ```
///
/// The first malformed row aborts the load; there is no partial result.
pub fn load_reader<R: Read>(reader: R) -> Result<InventoryDataset, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(LoadError::Header)?;
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(LoadError::MissingColumn(*missing));
    }

    let mut records = Vec::new();
    for (row_no, result) in csv_reader.deserialize::<Record>().enumerate() {
        let record = result.map_err(|source| LoadError::Row {
            // header is line 1
            line: source
                .position()
                .map(|p| p.line())
                .unwrap_or(row_no as u64 + 2),
            source,
        })?;
        records.push(record);
    }

    Ok(InventoryDataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Dimension;
    use chrono::NaiveDate;

    const SAMPLE_CSV: &str = "\
Date,Store ID,Product ID,Category,Region,Inventory Level,Units Sold,Price
2024-01-01,S001,P0001,Groceries,North,231,127,33.5
2024-01-01,S002,P0002,Toys,South,204,150,63.01
2024-01-02,S001,P0001,Groceries,North,102,65,27.99
2024-01-02,S003,P0003,Electronics,West,469,61,32.72
";

    #[test]
    fn load_sample_csv() {
        let ds = load_reader(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 4);

        let first = &ds.records[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(first.store_id, "S001");
        assert_eq!(first.category, "Groceries");
        assert_eq!(first.region, "North");
        assert!((first.inventory_level - 231.0).abs() < 1e-9);
        assert!((first.units_sold - 127.0).abs() < 1e-9);

        assert_eq!(ds.observed(Dimension::Region), ["North", "South", "West"]);
        assert_eq!(ds.observed(Dimension::Store), ["S001", "S002", "S003"]);
    }

    #[test]
    fn header_only_file_is_empty_dataset() {
        let csv_data = "Date,Region,Category,Store ID,Units Sold,Inventory Level\n";
        let ds = load_reader(csv_data.as_bytes()).unwrap();
        assert!(ds.is_empty());
        assert!(ds.observed(Dimension::Category).is_empty());
    }

    #[test]
    fn fields_are_trimmed() {
        let csv_data = "\
Date , Region , Category , Store ID , Units Sold , Inventory Level
 2024-02-29 , East , A , 1 , 10 , 5
";
        let ds = load_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(ds.records[0].region, "East");
        assert_eq!(ds.records[0].store_id, "1");
        assert_eq!(
            ds.records[0].date,
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn missing_column_is_named() {
        let csv_data = "Date,Region,Category,Units Sold,Inventory Level\n2024-01-01,East,A,1,2\n";
        let err = load_reader(csv_data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("Store ID")));
    }

    #[test]
    fn malformed_date_is_fatal_with_line() {
        let csv_data = "\
Date,Region,Category,Store ID,Units Sold,Inventory Level
2024-01-01,East,A,1,10,5
not-a-date,West,B,2,3,8
";
        let err = load_reader(csv_data.as_bytes()).unwrap_err();
        match &err {
            LoadError::Row { line, .. } => assert_eq!(*line, 3),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn malformed_number_is_fatal() {
        let csv_data = "\
Date,Region,Category,Store ID,Units Sold,Inventory Level
2024-01-01,East,A,1,ten,5
";
        assert!(matches!(
            load_reader(csv_data.as_bytes()),
            Err(LoadError::Row { .. })
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }
}
