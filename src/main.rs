//! # Doc Inquiry CLI (`docq`)
//!
//! ## Usage
//!
//! ```bash
//! docq --config ./config/docq.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `docq serve` | Start the browser form |
//! | `docq ask <folder> <question>` | Answer one question and print it |
//! | `docq check` | Probe the inference server |
//! | `docq scan <folder>` | Show which documents would be sent |
//!
//! ## Examples
//!
//! ```bash
//! # Start the form on the configured bind address
//! docq serve
//!
//! # One-shot question against a local folder
//! docq ask ~/notes "What did we decide about the release date?"
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use doc_inquiry::backend::InferenceClient;
use doc_inquiry::config::{self, Config};
use doc_inquiry::{logging, pipeline, scanner, server};

/// Doc Inquiry: ask a local language model about a folder of documents.
#[derive(Parser)]
#[command(
    name = "docq",
    about = "Ask a local language model questions about a folder of text and PDF documents",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/docq.toml`. When the file does not exist the
    /// built-in defaults are used (Ollama on localhost:11434, model `mistral`).
    #[arg(long, global = true, default_value = "./config/docq.toml")]
    config: PathBuf,

    /// Log at debug level (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the browser form.
    ///
    /// Binds to `[server].bind` and serves the form, a JSON endpoint at
    /// `/api/ask`, and `/health`.
    Serve,

    /// Answer one question from the documents in a folder.
    ///
    /// Runs the same chain as the form: health check, folder scan, query.
    Ask {
        /// Folder containing the documents. Subfolders are ignored.
        folder: String,

        /// The question to ask.
        question: String,
    },

    /// Check whether the inference server answers the probe prompt.
    Check,

    /// List the documents that would be sent for a folder.
    Scan {
        /// Folder containing the documents.
        folder: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        tracing::debug!(
            "config file {} not found, using defaults",
            cli.config.display()
        );
        Config::minimal()
    };

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Ask { folder, question } => {
            let client = InferenceClient::new(&cfg.backend)?;
            let answer = pipeline::answer(&client, &cfg.documents, &folder, &question).await?;
            println!("{}", answer);
        }
        Commands::Check => {
            let client = InferenceClient::new(&cfg.backend)?;
            if client.verify().await {
                println!("available ({})", client.url());
            } else {
                println!("unavailable ({})", client.url());
                std::process::exit(1);
            }
        }
        Commands::Scan { folder } => {
            let documents = scanner::scan_folder(&folder, &cfg.documents)?;
            println!("documents: {}", documents.len());
            for (i, text) in documents.iter().enumerate() {
                println!("  [{}] {} chars: {}", i, text.chars().count(), preview(text));
            }
        }
    }

    Ok(())
}

/// First line of `text`, cut to 60 characters.
fn preview(text: &str) -> String {
    let line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let mut out: String = line.trim().chars().take(60).collect();
    if line.trim().chars().count() > 60 {
        out.push_str("...");
    }
    out
}
