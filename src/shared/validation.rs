use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

lazy_static! {
    /// Extracts the sheet identifier from a shared Google Sheets URL
    /// - Valid: "https://docs.google.com/spreadsheets/d/1AbC-def_123/edit#gid=0"
    /// - Invalid: any URL without the "/spreadsheets/d/<id>" segment
    pub static ref SHEET_ID_REGEX: Regex =
        Regex::new(r"/spreadsheets/d/([a-zA-Z0-9-_]+)").unwrap();
}

/// Returns the sheet identifier embedded in a Google Sheets URL, if any
pub fn extract_sheet_id(url: &str) -> Option<&str> {
    SHEET_ID_REGEX
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Syntactic check only: the value must parse as an http or https URL.
/// Whether the target exists or serves an image is not our concern.
pub fn is_valid_http_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sheet_id_valid() {
        assert_eq!(
            extract_sheet_id("https://docs.google.com/spreadsheets/d/1AbC-def_123/edit#gid=0"),
            Some("1AbC-def_123")
        );
        assert_eq!(
            extract_sheet_id("https://docs.google.com/spreadsheets/d/xyz/export?format=csv"),
            Some("xyz")
        );
    }

    #[test]
    fn test_extract_sheet_id_invalid() {
        assert_eq!(extract_sheet_id("https://docs.google.com/document/d/abc"), None);
        assert_eq!(extract_sheet_id("not a url"), None);
        assert_eq!(extract_sheet_id(""), None);
    }

    #[test]
    fn test_is_valid_http_url() {
        assert!(is_valid_http_url("https://example.com/image1.jpg"));
        assert!(is_valid_http_url("http://example.com/i.png?x=1"));
        assert!(!is_valid_http_url("ftp://example.com/i.jpg"));
        assert!(!is_valid_http_url("example.com/i.jpg"));
        assert!(!is_valid_http_url("not-a-url"));
        assert!(!is_valid_http_url(""));
    }
}
