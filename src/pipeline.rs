//! Health check → folder scan → dispatch.
//!
//! Every surface (web form, JSON API, CLI) answers a question through
//! [`answer`]. The three steps run strictly in sequence and nothing is
//! kept between calls: each question re-reads the folder.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::backend::InferenceClient;
use crate::config::DocumentsConfig;
use crate::scanner::scan_folder;

/// Returned without scanning when the health check fails.
pub const BACKEND_UNAVAILABLE: &str =
    "API connection verification failed. Please check the API status.";

/// Answers `question` from the documents in `folder`.
///
/// Backend problems come back as `Ok` with a message. Only a folder or file
/// that cannot be read produces `Err`, and it aborts the query.
pub async fn answer(
    client: &InferenceClient,
    documents_config: &DocumentsConfig,
    folder: &str,
    question: &str,
) -> Result<String> {
    if !client.verify().await {
        return Ok(BACKEND_UNAVAILABLE.to_string());
    }

    let folder = PathBuf::from(folder);
    let config = documents_config.clone();
    let documents = tokio::task::spawn_blocking(move || scan_folder(&folder, &config))
        .await
        .context("document scan task failed")??;

    Ok(client.ask(question, &documents).await)
}
