//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

/// Check the backing store file is present; warn when it is missing.
pub async fn ensure_env(store_path: &str) -> anyhow::Result<()> {
    common::env::ensure_store_file(store_path).await
}
