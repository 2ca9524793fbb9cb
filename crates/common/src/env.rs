//! Environment/runtime helpers
//!
//! Sanity checks to ensure the expected backing file exists at startup.

use tracing::warn;

/// Check that the store file is present; warn when it is not.
///
/// The service never creates the file itself — a missing file surfaces as a
/// storage error on the first request, so the warning is the only startup
/// signal an operator gets.
pub async fn ensure_store_file(store_path: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(store_path).await.is_err() {
        warn!(%store_path, "store file not found; requests will fail until it exists");
    }
    Ok(())
}
