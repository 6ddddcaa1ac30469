//! # Doc Inquiry
//!
//! Ask a locally running language model questions about a folder of
//! documents.
//!
//! Every question reads the folder afresh, extracts the text of each
//! supported file (PDF, CSV, plain text, Markdown), and sends the whole
//! collection plus the question to an Ollama-style `/api/generate`
//! endpoint. Nothing is indexed, chunked, or cached.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌────────────┐   ┌──────────┐   ┌───────────┐
//! │  Form /  │──▶│  verify()  │──▶│  scan    │──▶│  ask()    │
//! │  CLI     │   │  (probe)   │   │  folder  │   │  (query)  │
//! └──────────┘   └────────────┘   └──────────┘   └───────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`encoding`] | Text encoding detection and lossy decoding |
//! | [`loader`] | Single-file text extraction |
//! | [`scanner`] | Non-recursive folder scanning |
//! | [`models`] | Inference server wire types |
//! | [`backend`] | Health check and query dispatch |
//! | [`pipeline`] | Health check → scan → dispatch |
//! | [`server`] | Browser form and JSON API |
//! | [`logging`] | Tracing subscriber setup |

pub mod backend;
pub mod config;
pub mod encoding;
pub mod loader;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod scanner;
pub mod server;
