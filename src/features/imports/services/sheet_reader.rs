use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use csv::ReaderBuilder;

use crate::features::imports::error::{ImportError, ImportResult};
use crate::shared::constants::FIRST_DATA_ROW;
use crate::shared::validation::extract_sheet_id;

/// XLSX files are zip archives, so they open with the zip local-file magic
const XLSX_MAGIC: &[u8] = b"PK\x03\x04";

/// A data row from the upload, keyed by normalized header name.
///
/// `number` is the spreadsheet row number as the user sees it, so the
/// first data row is 2 (row 1 holds the headers). Blank rows are skipped
/// but still consume a number.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub number: usize,
    cells: HashMap<String, String>,
}

impl RawRow {
    /// Look up a cell by trying each header alias in order
    pub fn value(&self, aliases: &[&str]) -> Option<&str> {
        aliases
            .iter()
            .find_map(|alias| self.cells.get(&normalize_header(alias)))
            .map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn from_pairs(number: usize, pairs: &[(&str, &str)]) -> Self {
        let cells = pairs
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| (normalize_header(k), v.trim().to_string()))
            .collect();
        Self { number, cells }
    }
}

/// Headers are compared case-insensitively with whitespace removed, so
/// "Image 1" and "image1" address the same column
pub fn normalize_header(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parse an uploaded spreadsheet, sniffing XLSX vs CSV from the leading bytes
pub fn parse_upload(bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
    if bytes.starts_with(XLSX_MAGIC) {
        parse_xlsx(bytes)
    } else {
        parse_csv(bytes)
    }
}

fn parse_xlsx(bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec()))
        .map_err(|e| ImportError::BadRequest(format!("Failed to read spreadsheet: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImportError::BadRequest("No data found in the file".to_string()))?
        .map_err(|e| ImportError::BadRequest(format!("Failed to read spreadsheet: {e}")))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .map(|cell| normalize_header(&cell_to_string(cell)))
            .collect(),
        None => return Ok(Vec::new()),
    };

    let mut parsed = Vec::new();
    for (index, row) in rows.enumerate() {
        let values = row.iter().map(cell_to_string);
        if let Some(raw) = collect_row(FIRST_DATA_ROW + index, &headers, values) {
            parsed.push(raw);
        }
    }

    Ok(parsed)
}

fn parse_csv(bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ImportError::BadRequest(format!("Failed to parse CSV: {e}")))?
        .iter()
        .map(normalize_header)
        .collect();

    let mut parsed = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record
            .map_err(|e| ImportError::BadRequest(format!("Failed to parse CSV: {e}")))?;
        let values = record.iter().map(str::to_string);
        if let Some(raw) = collect_row(FIRST_DATA_ROW + index, &headers, values) {
            parsed.push(raw);
        }
    }

    Ok(parsed)
}

/// Build a row map from cell values, dropping blanks; returns None for
/// rows with no data at all. The first column wins when two headers
/// normalize to the same name.
fn collect_row(
    number: usize,
    headers: &[String],
    values: impl Iterator<Item = String>,
) -> Option<RawRow> {
    let mut cells = HashMap::new();
    for (col, value) in values.enumerate() {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let Some(header) = headers.get(col) else {
            continue;
        };
        if header.is_empty() {
            continue;
        }
        cells
            .entry(header.clone())
            .or_insert_with(|| value.to_string());
    }

    if cells.is_empty() {
        None
    } else {
        Some(RawRow { number, cells })
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // Sheets store sizes like 600 as floats, render integers without ".0"
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Download a publicly shared Google Sheet as CSV
pub async fn fetch_google_sheet(url: &str) -> ImportResult<Vec<u8>> {
    let sheet_id = extract_sheet_id(url)
        .ok_or_else(|| ImportError::BadRequest("Invalid Google Sheets URL".to_string()))?;

    let csv_url = format!("https://docs.google.com/spreadsheets/d/{sheet_id}/export?format=csv");

    let response = reqwest::get(&csv_url).await.map_err(|_| fetch_failed())?;
    if !response.status().is_success() {
        return Err(fetch_failed());
    }

    let body = response.bytes().await.map_err(|_| fetch_failed())?;
    Ok(body.to_vec())
}

fn fetch_failed() -> ImportError {
    ImportError::BadRequest(
        "Failed to fetch Google Sheet. Make sure it's publicly accessible.".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_headers_by_case_and_whitespace() {
        assert_eq!(normalize_header("Design Name"), "designname");
        assert_eq!(normalize_header("  Image 1 "), "image1");
        assert_eq!(normalize_header("IMAGE1"), "image1");
    }

    #[test]
    fn parses_csv_with_aliased_headers() {
        let csv = "Product Name,Size,Surface,Image 1\n\
                   AMORA BLUE,600x1200mm,GLOSSY,https://example.com/a.jpg\n";

        let rows = parse_upload(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].number, 2);
        assert_eq!(
            rows[0].value(&["Design Name", "Product Name", "Name", "Product"]),
            Some("AMORA BLUE")
        );
        assert_eq!(
            rows[0].value(&["Collection", "Finish", "Surface"]),
            Some("GLOSSY")
        );
        assert_eq!(
            rows[0].value(&["Image1", "Image 1", "Image1 URL"]),
            Some("https://example.com/a.jpg")
        );
    }

    #[test]
    fn skips_blank_rows_but_keeps_numbering() {
        let csv = "Design Name,Size\n\
                   AMORA BLUE,600x1200mm\n\
                   ,\n\
                   AMORA ICE,600x1200mm\n";

        let rows = parse_upload(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 2);
        assert_eq!(rows[1].number, 4);
    }

    #[test]
    fn first_column_wins_on_duplicate_headers() {
        let csv = "Design Name,Name\nAMORA BLUE,OTHER\n";

        let rows = parse_upload(csv.as_bytes()).unwrap();
        assert_eq!(
            rows[0].value(&["Design Name", "Product Name", "Name", "Product"]),
            Some("AMORA BLUE")
        );
    }

    #[test]
    fn empty_csv_yields_no_rows() {
        let rows = parse_upload(b"Design Name,Size\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn trims_cell_values() {
        let csv = "Design Name,Size\n  AMORA BLUE  ,600x1200mm\n";

        let rows = parse_upload(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].value(&["Design Name"]), Some("AMORA BLUE"));
    }
}
