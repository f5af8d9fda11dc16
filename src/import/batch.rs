// src/import/batch.rs
// =============================================================================
// Sends domain records to the service in batches.
//
// How it works:
// 1. Split the records into consecutive chunks of at most 100
// 2. POST each chunk to `domains/bulk` as {"domains": [...]}
// 3. Pause half a second before the next chunk
// 4. Stop at the first chunk the service doesn't accept
//
// Chunks that already went through stay imported; there's no rollback and
// no retry of the failed chunk.
// =============================================================================

use crate::api::{ApiClient, BulkImportRequest, DomainRecord};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

use super::{read_domain_records, ImportError};

/// Records per import call.
pub const BATCH_SIZE: usize = 100;

/// Pause between two import calls.
pub const BATCH_PACING: Duration = Duration::from_millis(500);

const STAGE: &str = "importing domains";

/// How batches are cut and paced.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub batch_size: usize,
    pub pacing: Duration,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            batch_size: BATCH_SIZE,
            pacing: BATCH_PACING,
        }
    }
}

/// Sends `records` batch by batch and returns how many were imported.
///
/// Prints one line per accepted batch. On the first failure returns
/// [`ImportError::Batch`] with the 1-based batch number; later batches are
/// never sent.
pub async fn send_batches(
    client: &ApiClient,
    records: &[DomainRecord],
    options: &ImportOptions,
) -> Result<usize, ImportError> {
    let batch_size = options.batch_size.max(1);
    let mut imported = 0;

    for (index, batch) in records.chunks(batch_size).enumerate() {
        let number = index + 1;

        // Fixed pacing between calls, not after the last one
        if index > 0 && !options.pacing.is_zero() {
            tokio::time::sleep(options.pacing).await;
        }

        debug!(batch = number, size = batch.len(), "sending import batch");

        client
            .post_json::<_, serde_json::Value>(
                "domains/bulk",
                &BulkImportRequest { domains: batch },
                STAGE,
            )
            .await
            .map_err(|source| {
                warn!(batch = number, stage = source.stage(), error = %source, "import batch failed");
                ImportError::Batch {
                    batch: number,
                    source,
                }
            })?;

        imported += batch.len();
        println!("✅ Imported batch {}: {} domains", number, batch.len());
    }

    Ok(imported)
}

/// Reads `csv_file` and imports every record.
///
/// Returns true only if the file was readable and every batch succeeded.
/// All progress and failures are printed for the operator.
pub async fn import_domains_from_csv(
    client: &ApiClient,
    csv_file: &Path,
    options: &ImportOptions,
) -> bool {
    println!("📂 Reading domains from {}...", csv_file.display());

    let records = match read_domain_records(csv_file) {
        Ok(records) => records,
        Err(e) => {
            println!("❌ {}", e);
            return false;
        }
    };

    println!("📝 Found {} domains to import", records.len());

    match send_batches(client, &records, options).await {
        Ok(imported) => {
            println!("🎉 Successfully imported {} domains", imported);
            true
        }
        Err(e) => {
            println!("❌ {}", e);
            false
        }
    }
}
