// src/export.rs
// =============================================================================
// Downloads crawl results and saves them to disk.
//
// `GET domains/export` returns CSV produced by the service. We don't parse
// or check it: the bytes of a 2xx body land in the file unchanged, and a
// non-2xx answer leaves the filesystem alone.
// =============================================================================

use crate::api::ApiClient;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const STAGE: &str = "exporting results";

/// `crawl_results_<unix seconds>.csv` in the current directory.
pub fn default_export_path() -> PathBuf {
    PathBuf::from(format!(
        "crawl_results_{}.csv",
        chrono::Utc::now().timestamp()
    ))
}

/// Downloads the export and writes it to `output`. Returns bytes written.
pub async fn save_export(client: &ApiClient, output: &Path) -> Result<usize> {
    let body = client.get_raw("domains/export", STAGE).await?;

    std::fs::write(output, &body)
        .with_context(|| format!("Could not write {}", output.display()))?;

    Ok(body.len())
}

/// Exports results to `output` and prints the outcome. Returns true on success.
pub async fn export_results(client: &ApiClient, output: &Path) -> bool {
    println!("📤 Exporting results to {}...", output.display());

    match save_export(client, output).await {
        Ok(_) => {
            println!("✅ Results exported to {}", output.display());
            true
        }
        Err(e) => {
            println!("❌ {:#}", e);
            false
        }
    }
}
