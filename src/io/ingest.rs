//! CSV ingest for the two source tables.
//!
//! Both tables are loaded strictly: any missing file, arity mismatch, or bad
//! value aborts the load with `ErrorKind::DataUnavailable`. There is no
//! partial-data mode.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::domain::{Dataset, PricePoint, RegionPurchase};
use crate::error::AppError;

const PRICE_COLUMNS: usize = 3;
const PURCHASE_COLUMNS: usize = 2;

/// Header used by the purchase export to name the quantity column.
const PURCHASED_KG_HEADER: &str = "silver_purchased_kg";

/// Load both tables named by `config`.
pub fn load_dataset(config: &DashboardConfig) -> Result<Dataset, AppError> {
    let prices_path = config.prices_path();
    let purchases_path = config.purchases_path();
    let prices = load_price_history(&prices_path)?;
    let purchases = load_region_purchases(&purchases_path)?;
    info!(
        prices_path = %prices_path.display(),
        purchases_path = %purchases_path.display(),
        prices = prices.len(),
        regions = purchases.len(),
        "dataset loaded"
    );
    Ok(Dataset { prices, purchases })
}

pub fn load_price_history(path: &Path) -> Result<Vec<PricePoint>, AppError> {
    let file = open(path)?;
    read_price_history(file, &path.display().to_string())
}

pub fn load_region_purchases(path: &Path) -> Result<Vec<RegionPurchase>, AppError> {
    let file = open(path)?;
    read_region_purchases(file, &path.display().to_string())
}

/// Parse the price table: `Year, Month, Price-per-kg`, matched by position.
pub fn read_price_history<R: Read>(reader: R, source: &str) -> Result<Vec<PricePoint>, AppError> {
    let mut reader = csv_reader(reader);
    let headers = read_headers(&mut reader, source)?;
    ensure_arity(&headers, PRICE_COLUMNS, source, 1)?;

    let mut points = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: records start after the header and lines are 1-based.
        let line = idx + 2;
        let record = result.map_err(|e| row_error(source, line, format!("CSV parse error: {e}")))?;
        ensure_arity(&record, PRICE_COLUMNS, source, line)?;

        let year = field(&record, 0)
            .parse::<i32>()
            .map_err(|_| row_error(source, line, format!("invalid year '{}'", field(&record, 0))))?;
        let month = field(&record, 1);
        if month.is_empty() {
            return Err(row_error(source, line, "missing month"));
        }
        let price_per_kg = parse_quantity(field(&record, 2)).map_err(|e| row_error(source, line, e))?;

        points.push(PricePoint {
            year,
            month: month.to_string(),
            price_per_kg,
        });
    }

    debug!(source, rows = points.len(), "price history parsed");
    Ok(points)
}

/// Parse the purchase table: a region column and a kilogram column.
///
/// The kilogram column is the one headed `Silver_Purchased_kg` when present,
/// otherwise the second column.
pub fn read_region_purchases<R: Read>(reader: R, source: &str) -> Result<Vec<RegionPurchase>, AppError> {
    let mut reader = csv_reader(reader);
    let headers = read_headers(&mut reader, source)?;
    ensure_arity(&headers, PURCHASE_COLUMNS, source, 1)?;

    let kg_col = headers
        .iter()
        .position(|h| normalize_header_name(h) == PURCHASED_KG_HEADER)
        .unwrap_or(1);
    let region_col = 1 - kg_col;

    let mut seen = HashSet::new();
    let mut purchases = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        let record = result.map_err(|e| row_error(source, line, format!("CSV parse error: {e}")))?;
        ensure_arity(&record, PURCHASE_COLUMNS, source, line)?;

        let region = field(&record, region_col);
        if region.is_empty() {
            return Err(row_error(source, line, "missing region name"));
        }
        if !seen.insert(region.to_string()) {
            return Err(row_error(source, line, format!("duplicate region '{region}'")));
        }
        let purchased_kg = parse_quantity(field(&record, kg_col)).map_err(|e| row_error(source, line, e))?;

        purchases.push(RegionPurchase {
            region: region.to_string(),
            purchased_kg,
        });
    }

    debug!(source, rows = purchases.len(), "region purchases parsed");
    Ok(purchases)
}

fn open(path: &Path) -> Result<File, AppError> {
    File::open(path).map_err(|e| {
        AppError::data_unavailable(format!("Failed to open CSV '{}': {e}", path.display()))
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    // Flexible so arity problems surface through `ensure_arity` with a line number.
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn read_headers<R: Read>(reader: &mut csv::Reader<R>, source: &str) -> Result<StringRecord, AppError> {
    let headers = reader
        .headers()
        .map_err(|e| AppError::data_unavailable(format!("Failed to read CSV headers in '{source}': {e}")))?
        .clone();
    if headers.iter().all(|h| normalize_header_name(h).is_empty()) {
        return Err(AppError::data_unavailable(format!("'{source}' has no header row")));
    }
    Ok(headers)
}

fn ensure_arity(record: &StringRecord, expected: usize, source: &str, line: usize) -> Result<(), AppError> {
    if record.len() == expected {
        Ok(())
    } else {
        Err(row_error(
            source,
            line,
            format!("expected {expected} columns, found {}", record.len()),
        ))
    }
}

fn row_error(source: &str, line: usize, message: impl std::fmt::Display) -> AppError {
    AppError::data_unavailable(format!("{source}:{line}: {message}"))
}

fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}

/// Parse a non-negative, finite quantity. Thousands separators are accepted.
fn parse_quantity(raw: &str) -> Result<f64, String> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let value = cleaned
        .parse::<f64>()
        .map_err(|_| format!("invalid number '{raw}'"))?;
    if !value.is_finite() {
        return Err(format!("non-finite number '{raw}'"));
    }
    if value < 0.0 {
        return Err(format!("negative quantity '{raw}'"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const PRICES: &str = "\
Year,Month,Silver_Price_INR_per_kg
2019,Jan,38500
2019,Feb,39120.5
2020,Jan,\"41,000\"
";

    const PURCHASES: &str = "\
State,Silver_Purchased_kg
Kerala,520.5
Punjab,480
Goa,75
";

    #[test]
    fn reads_prices_in_file_order() {
        let points = read_price_history(PRICES.as_bytes(), "prices").unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].year, 2019);
        assert_eq!(points[0].month, "Jan");
        assert_eq!(points[1].price_per_kg, 39120.5);
        assert_eq!(points[2].price_per_kg, 41000.0);
    }

    #[test]
    fn price_headers_are_positional() {
        let csv = "yr,mon,price\n2021,Mar,65000\n";
        let points = read_price_history(csv.as_bytes(), "prices").unwrap();
        assert_eq!(points[0].month, "Mar");
        assert_eq!(points[0].price_per_kg, 65000.0);
    }

    #[test]
    fn reads_purchases_in_file_order() {
        let rows = read_region_purchases(PURCHASES.as_bytes(), "states").unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(names, ["Kerala", "Punjab", "Goa"]);
        assert_eq!(rows[0].purchased_kg, 520.5);
    }

    #[test]
    fn purchase_column_is_found_by_name_with_bom() {
        let csv = "\u{feff}Silver_Purchased_kg,State\n12,Assam\n";
        let rows = read_region_purchases(csv.as_bytes(), "states").unwrap();
        assert_eq!(rows[0].region, "Assam");
        assert_eq!(rows[0].purchased_kg, 12.0);
    }

    #[test]
    fn header_only_tables_are_empty() {
        assert!(read_price_history("Year,Month,Price\n".as_bytes(), "p").unwrap().is_empty());
        assert!(read_region_purchases("State,Kg\n".as_bytes(), "s").unwrap().is_empty());
    }

    #[test]
    fn wrong_header_arity_is_data_unavailable() {
        let err = read_price_history("Year,Price\n2019,1\n".as_bytes(), "p").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataUnavailable);
        assert!(err.to_string().contains("expected 3 columns"));
    }

    #[test]
    fn wrong_row_arity_reports_line() {
        let csv = "State,Kg\nGoa,1\nKerala,2,3\n";
        let err = read_region_purchases(csv.as_bytes(), "states").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataUnavailable);
        assert!(err.to_string().starts_with("states:3:"));
    }

    #[test]
    fn duplicate_region_is_rejected() {
        let csv = "State,Kg\nGoa,1\nGoa,2\n";
        let err = read_region_purchases(csv.as_bytes(), "states").unwrap_err();
        assert!(err.to_string().contains("duplicate region 'Goa'"));
    }

    #[test]
    fn negative_and_non_numeric_values_are_rejected() {
        let err = read_region_purchases("State,Kg\nGoa,-1\n".as_bytes(), "s").unwrap_err();
        assert!(err.to_string().contains("negative"));

        let err = read_price_history("Y,M,P\n2019,Jan,abc\n".as_bytes(), "p").unwrap_err();
        assert!(err.to_string().contains("invalid number"));

        let err = read_price_history("Y,M,P\nnext,Jan,1\n".as_bytes(), "p").unwrap_err();
        assert!(err.to_string().contains("invalid year"));
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_price_history(&dir.path().join("nope.csv")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataUnavailable);
    }

    #[test]
    fn load_dataset_reads_both_files_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("p.csv"), PRICES).unwrap();
        std::fs::write(dir.path().join("s.csv"), PURCHASES).unwrap();
        let config = DashboardConfig {
            data_dir: dir.path().to_path_buf(),
            prices_file: "p.csv".into(),
            purchases_file: "s.csv".into(),
            ..DashboardConfig::default()
        };

        let data = load_dataset(&config).unwrap();
        assert_eq!(data.prices.len(), 3);
        assert_eq!(data.purchases.len(), 3);
    }

    #[test]
    fn load_dataset_fails_when_either_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("p.csv"), PRICES).unwrap();
        let config = DashboardConfig {
            data_dir: dir.path().to_path_buf(),
            prices_file: "p.csv".into(),
            purchases_file: "s.csv".into(),
            ..DashboardConfig::default()
        };
        assert_eq!(load_dataset(&config).unwrap_err().kind(), ErrorKind::DataUnavailable);
    }
}
