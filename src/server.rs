//! Browser form and JSON API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | The inquiry form |
//! | `POST` | `/` | Submit the form; the answer is rendered below it |
//! | `POST` | `/api/ask` | JSON `{folder, question}` → `{answer}` |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! Backend failures are answers like any other: they are rendered in the
//! response area (or returned as `answer`). Only a document folder that
//! cannot be read fails the JSON call, with
//! `{ "error": { "code": "scan_failed", "message": "..." } }`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::backend::InferenceClient;
use crate::config::Config;
use crate::pipeline;

/// Shared state handed to every handler.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    client: Arc<InferenceClient>,
}

/// Builds the application router without binding a socket.
pub fn router(config: &Config) -> anyhow::Result<Router> {
    let state = AppState {
        config: Arc::new(config.clone()),
        client: Arc::new(InferenceClient::new(&config.backend)?),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(Router::new()
        .route("/", get(handle_form).post(handle_form_submit))
        .route("/api/ask", post(handle_api_ask))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state))
}

/// Serves the form on `[server].bind` until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let app = router(config)?;
    let bind_addr = &config.server.bind;

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(
        backend = %config.backend.url,
        "document inquiry listening on http://{}",
        bind_addr
    );
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn scan_failed(err: anyhow::Error) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "scan_failed".to_string(),
        message: format!("{:#}", err),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ Form ============

#[derive(Debug, Deserialize)]
struct AskParams {
    #[serde(default)]
    folder: String,
    #[serde(default)]
    question: String,
}

async fn handle_form() -> Html<String> {
    Html(render_page("", "", ""))
}

async fn handle_form_submit(
    State(state): State<AppState>,
    Form(params): Form<AskParams>,
) -> Html<String> {
    let output = match pipeline::answer(
        &state.client,
        &state.config.documents,
        &params.folder,
        &params.question,
    )
    .await
    {
        Ok(answer) => answer,
        Err(e) => {
            tracing::error!("query aborted: {:#}", e);
            format!("Failed to load documents: {:#}", e)
        }
    };

    Html(render_page(&params.folder, &params.question, &output))
}

// ============ POST /api/ask ============

#[derive(Serialize)]
struct AskResponse {
    answer: String,
}

async fn handle_api_ask(
    State(state): State<AppState>,
    Json(params): Json<AskParams>,
) -> Result<Json<AskResponse>, AppError> {
    let answer = pipeline::answer(
        &state.client,
        &state.config.documents,
        &params.folder,
        &params.question,
    )
    .await
    .map_err(scan_failed)?;

    Ok(Json(AskResponse { answer }))
}

// ============ HTML ============

fn render_page(folder: &str, question: &str, output: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Document Inquiry</title>
<style>
body {{ font-family: sans-serif; max-width: 960px; margin: 2rem auto; }}
form {{ display: flex; gap: 1rem; align-items: flex-end; }}
label {{ flex: 1; display: flex; flex-direction: column; }}
textarea {{ width: 100%; min-height: 12rem; }}
</style>
</head>
<body>
<h3>Document Inquiry - Local LLM</h3>
<form method="post" action="/">
<label>Enter the path to your document repository
<input type="text" name="folder" value="{folder}" placeholder="Path to folder containing your text or PDF documents..."></label>
<label>Enter your question
<input type="text" name="question" value="{question}" placeholder="What would you like to ask?"></label>
<button type="submit">Ask</button>
</form>
<h4>Response</h4>
<textarea id="output" readonly>
{output}</textarea>
</body>
</html>
"#,
        folder = escape_html(folder),
        question = escape_html(question),
        output = escape_html(output),
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
