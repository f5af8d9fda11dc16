// src/import/mod.rs
// =============================================================================
// This module gets domains from a CSV file into the crawling service.
//
// Submodules:
// - reader: parses the CSV into DomainRecord values (file order preserved)
// - batch: sends those records 100 at a time to `domains/bulk`
// =============================================================================

mod batch;
mod reader;

use crate::api::ApiError;
use std::path::PathBuf;
use thiserror::Error;

pub use batch::{import_domains_from_csv, ImportOptions};
use reader::read_domain_records;

/// Why an import stopped.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Could not open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid CSV row on line {line}: {source}")]
    Row {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to import batch {batch}: {source}")]
    Batch {
        batch: usize,
        #[source]
        source: ApiError,
    },
}
