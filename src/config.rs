//! TOML configuration parsing.
//!
//! Every section and field has a default, so an empty file (or no file at
//! all, via [`Config::minimal`]) yields a working setup that talks to a
//! local Ollama instance.
//!
//! ```toml
//! [backend]
//! url = "http://localhost:11434/api/generate"
//! model = "mistral"
//!
//! [documents]
//! text_extensions = ["csv", "txt", "md"]
//!
//! [server]
//! bind = "127.0.0.1:7860"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub documents: DocumentsConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Inference server settings.
#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Full URL of the generate endpoint.
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Model named in the probe request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Prompt sent by the health check.
    #[serde(default = "default_probe_prompt")]
    pub probe_prompt: String,
    /// Substring the probe answer must contain for the backend to count as available.
    #[serde(default = "default_probe_marker")]
    pub probe_marker: String,
    /// Request timeout. `None` waits for as long as the transport allows.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            model: default_model(),
            probe_prompt: default_probe_prompt(),
            probe_marker: default_probe_marker(),
            timeout_secs: None,
        }
    }
}

fn default_backend_url() -> String {
    "http://localhost:11434/api/generate".to_string()
}
fn default_model() -> String {
    "mistral".to_string()
}
fn default_probe_prompt() -> String {
    "Say Hello back to me, and only say Hello".to_string()
}
fn default_probe_marker() -> String {
    "Hello".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct DocumentsConfig {
    /// Extensions decoded as plain text, lowercase and without the dot.
    /// PDF is always handled separately.
    #[serde(default = "default_text_extensions")]
    pub text_extensions: Vec<String>,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            text_extensions: default_text_extensions(),
        }
    }
}

fn default_text_extensions() -> Vec<String> {
    vec!["csv".to_string(), "txt".to_string(), "md".to_string()]
}

impl DocumentsConfig {
    pub fn is_text_extension(&self, ext: &str) -> bool {
        self.text_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7860".to_string()
}

impl Config {
    /// Built-in defaults, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content)
}

/// Parses and validates a TOML config document.
pub fn parse_config(content: &str) -> Result<Config> {
    let mut config: Config =
        toml::from_str(content).with_context(|| "Failed to parse config file")?;

    // Validate backend
    let url = &config.backend.url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        anyhow::bail!("backend.url must start with http:// or https://, got '{}'", url);
    }
    if config.backend.model.trim().is_empty() {
        anyhow::bail!("backend.model must not be empty");
    }
    if config.backend.probe_marker.is_empty() {
        anyhow::bail!("backend.probe_marker must not be empty");
    }
    if config.backend.timeout_secs == Some(0) {
        anyhow::bail!("backend.timeout_secs must be > 0 when set");
    }

    // Normalize and validate document extensions
    for ext in config.documents.text_extensions.iter_mut() {
        *ext = ext.trim().trim_start_matches('.').to_ascii_lowercase();
        if ext.is_empty() {
            anyhow::bail!("documents.text_extensions must not contain empty entries");
        }
        if ext == "pdf" {
            anyhow::bail!("documents.text_extensions must not include 'pdf'; PDFs are always extracted as paginated documents");
        }
    }

    Ok(config)
}
