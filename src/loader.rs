//! Single-file text extraction.
//!
//! The file extension (case-insensitive) picks the strategy: PDFs are
//! extracted page by page, configured plain-text extensions are decoded
//! with [`crate::encoding`], and everything else is reported as
//! [`LoadedDocument::Unsupported`].

use std::path::Path;

use crate::config::DocumentsConfig;
use crate::encoding::decode_lossy;

/// Text form of [`LoadedDocument::Unsupported`].
pub const UNSUPPORTED_FORMAT: &str = "Unsupported file format.";

const PDF_EXTENSION: &str = "pdf";

/// Outcome of loading one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedDocument {
    Text(String),
    /// The extension is neither PDF nor a configured text extension.
    Unsupported,
}

impl LoadedDocument {
    /// The extracted text, or [`UNSUPPORTED_FORMAT`].
    #[cfg(test)]
    pub(crate) fn as_text(&self) -> &str {
        match self {
            LoadedDocument::Text(text) => text,
            LoadedDocument::Unsupported => UNSUPPORTED_FORMAT,
        }
    }

    /// Consumes the outcome, keeping only usable, non-empty text.
    pub fn into_text(self) -> Option<String> {
        match self {
            LoadedDocument::Text(text) if !text.is_empty() && text != UNSUPPORTED_FORMAT => {
                Some(text)
            }
            _ => None,
        }
    }
}

/// Error for files that exist but cannot be turned into text.
#[derive(Debug)]
pub enum LoadError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Pdf {
        path: String,
        message: String,
    },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => write!(f, "failed to read {}: {}", path, source),
            LoadError::Pdf { path, message } => {
                write!(f, "PDF extraction failed for {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Pdf { .. } => None,
        }
    }
}

/// Loads the text of a single file.
pub fn load_document(path: &Path, config: &DocumentsConfig) -> Result<LoadedDocument, LoadError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    if ext == PDF_EXTENSION {
        let bytes = read_bytes(path)?;
        return extract_pdf(&bytes).map(LoadedDocument::Text).map_err(|message| {
            LoadError::Pdf {
                path: path.display().to_string(),
                message,
            }
        });
    }

    if config.is_text_extension(&ext) {
        let bytes = read_bytes(path)?;
        return Ok(LoadedDocument::Text(decode_lossy(&bytes)));
    }

    Ok(LoadedDocument::Unsupported)
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Page texts in page order, joined without a separator.
fn extract_pdf(bytes: &[u8]) -> Result<String, String> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| e.to_string())?;
    Ok(pages.concat())
}
