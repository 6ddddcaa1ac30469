//! Folder scanning.
//!
//! Only the direct entries of the folder are considered; subfolders are
//! never traversed. Collection order is whatever the filesystem yields.
//! The first file that fails to load aborts the whole scan.

use anyhow::{bail, Context, Result};
use std::path::Path;
use walkdir::WalkDir;

use crate::config::DocumentsConfig;
use crate::loader::load_document;

/// Loads every supported, non-empty document directly inside `folder`.
pub fn scan_folder(folder: &Path, config: &DocumentsConfig) -> Result<Vec<String>> {
    if !folder.is_dir() {
        bail!("Document folder does not exist: {}", folder.display());
    }
    // Surface permission problems on the folder itself instead of
    // returning an empty collection.
    std::fs::read_dir(folder)
        .with_context(|| format!("Failed to list folder: {}", folder.display()))?;

    let mut documents = Vec::new();
    let mut skipped = 0usize;

    let walker = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);
    for entry in walker {
        // Entries that vanish or cannot be stat'ed are not files.
        let Ok(entry) = entry else {
            continue;
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let loaded = load_document(entry.path(), config)?;
        match loaded.into_text() {
            Some(text) => documents.push(text),
            None => skipped += 1,
        }
    }

    tracing::info!(
        folder = %folder.display(),
        loaded = documents.len(),
        skipped,
        "scanned document folder"
    );

    Ok(documents)
}
