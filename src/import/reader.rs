// src/import/reader.rs
// =============================================================================
// Reads the domain list from a CSV file.
//
// Expected header: domain,webmaster_email[,max_pages]
//
//   domain,webmaster_email,max_pages
//   example.com,admin@example.com,10
//   example.org,webmaster@example.org,
//
// An absent max_pages column or an empty cell means the default of 5 pages.
// Rows come back in file order.
// =============================================================================

use crate::api::{DomainRecord, DEFAULT_MAX_PAGES};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use super::ImportError;

// A raw CSV row, before defaults are applied
#[derive(Debug, Deserialize)]
struct CsvRow {
    domain: String,
    webmaster_email: String,
    #[serde(default)]
    max_pages: Option<u32>,
}

impl From<CsvRow> for DomainRecord {
    fn from(row: CsvRow) -> Self {
        DomainRecord {
            domain: row.domain,
            webmaster_email: row.webmaster_email,
            max_pages: row.max_pages.unwrap_or(DEFAULT_MAX_PAGES),
        }
    }
}

/// Reads every record from the CSV file at `path`.
///
/// The first bad row fails the whole read; nothing is imported from a
/// half-valid file.
pub fn read_domain_records(path: &Path) -> Result<Vec<DomainRecord>, ImportError> {
    let file = std::fs::File::open(path).map_err(|source| ImportError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    parse_domain_records(file)
}

/// Same as [`read_domain_records`] but from any reader.
pub fn parse_domain_records<R: Read>(input: R) -> Result<Vec<DomainRecord>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut records = Vec::new();

    for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
        // The reader knows the real line (quoted cells can span lines);
        // otherwise +2: one for the header, one because humans count from 1
        let row = row.map_err(|source| ImportError::Row {
            line: source
                .position()
                .map(|pos| pos.line() as usize)
                .unwrap_or(index + 2),
            source,
        })?;
        records.push(DomainRecord::from(row));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_max_pages() {
        let csv = "domain,webmaster_email,max_pages\n\
                   example.com,admin@example.com,10\n\
                   example.org,webmaster@example.org,\n";
        let records = parse_domain_records(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].domain, "example.com");
        assert_eq!(records[0].webmaster_email, "admin@example.com");
        assert_eq!(records[0].max_pages, 10);
        // Empty cell falls back to the default
        assert_eq!(records[1].max_pages, DEFAULT_MAX_PAGES);
    }

    #[test]
    fn test_parse_without_max_pages_column() {
        let csv = "domain,webmaster_email\nexample.com,admin@example.com\n";
        let records = parse_domain_records(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].max_pages, 5);
    }

    #[test]
    fn test_parse_trims_and_keeps_order() {
        let csv = "domain , webmaster_email\n  c.com , c@c.com\nb.com,b@b.com\na.com,a@a.com\n";
        let records = parse_domain_records(csv.as_bytes()).unwrap();

        let domains: Vec<_> = records.iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(domains, vec!["c.com", "b.com", "a.com"]);
        assert_eq!(records[0].webmaster_email, "c@c.com");
    }

    #[test]
    fn test_parse_header_only() {
        let records = parse_domain_records("domain,webmaster_email\n".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_bad_max_pages_names_line() {
        let csv = "domain,webmaster_email,max_pages\na.com,a@a.com,1\nb.com,b@b.com,lots\n";
        let err = parse_domain_records(csv.as_bytes()).unwrap_err();

        match err {
            ImportError::Row { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_row_after_multiline_cell_names_real_line() {
        // Row 1 spans lines 2-3, so the bad row sits on line 4
        let csv = "domain,webmaster_email,max_pages\n\
                   \"a.com\",\"first line\nsecond line\",1\n\
                   b.com,b@b.com,lots\n";
        let err = parse_domain_records(csv.as_bytes()).unwrap_err();

        match err {
            ImportError::Row { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "domain,max_pages\na.com,3\n";
        assert!(parse_domain_records(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = read_domain_records(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, ImportError::Open { .. }));
    }
}
