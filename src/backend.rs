//! Client for the local inference server.
//!
//! Two round trips are supported, both as single un-retried `POST`s to the
//! configured generate endpoint:
//!
//! - [`InferenceClient::verify`] sends the fixed probe prompt and reports
//!   whether the answer contains the configured marker.
//! - [`InferenceClient::ask`] sends the question with every document and
//!   returns the answer text.
//!
//! Neither returns an error. Transport, status and parsing failures are
//! logged and folded into `false` or into a user-facing message, since the
//! caller shows answers and failures in the same place.

use anyhow::Result;
use std::time::Duration;

use crate::config::BackendConfig;
use crate::models::{GenerateResponse, ProbeRequest, QueryRequest};

/// Returned by [`InferenceClient::ask`] when a 200 body cannot be read.
pub const PARSING_ERROR: &str = "Error in parsing response.";

/// Returned by [`InferenceClient::ask`] when a 200 body has no `choices`.
pub const NO_RESPONSE: &str = "No response or unexpected response structure.";

pub struct InferenceClient {
    client: reqwest::Client,
    url: String,
    model: String,
    probe_prompt: String,
    probe_marker: String,
}

impl InferenceClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            url: config.url.clone(),
            model: config.model.clone(),
            probe_prompt: config.probe_prompt.clone(),
            probe_marker: config.probe_marker.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Health check: `true` only for a 200 whose first choice text
    /// contains the probe marker.
    pub async fn verify(&self) -> bool {
        let body = ProbeRequest {
            model: &self.model,
            prompt: &self.probe_prompt,
        };

        let response = match self.client.post(&self.url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    url = %self.url,
                    "could not connect to the inference server: {}",
                    e
                );
                return false;
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(url = %self.url, "failed to read probe response: {}", e);
                return false;
            }
        };
        tracing::debug!(status = status.as_u16(), body = %text, "raw probe response");

        let parsed: GenerateResponse = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("JSON parsing error: {}. Response content: '{}'", e, text);
                return false;
            }
        };

        let answer = first_choice_text(&parsed).unwrap_or_default();
        if status == reqwest::StatusCode::OK && answer.contains(&self.probe_marker) {
            tracing::info!(url = %self.url, model = %self.model, "inference server is available");
            true
        } else {
            tracing::warn!(
                status = status.as_u16(),
                "inference server failed the probe, response: {}",
                text
            );
            false
        }
    }

    /// Sends `question` and the whole document collection, returning the
    /// answer or a descriptive error message.
    pub async fn ask(&self, question: &str, documents: &[String]) -> String {
        let body = QueryRequest {
            documents,
            query: question,
        };
        tracing::info!(documents = documents.len(), "dispatching query");

        let response = match self.client.post(&self.url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %self.url, "query request failed: {}", e);
                return format!("An error occurred: {}", e);
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("failed to read query response: {}", e);
                return format!("An error occurred: {}", e);
            }
        };
        tracing::info!(status = status.as_u16(), "inference server responded");

        if status != reqwest::StatusCode::OK {
            return format!("An error occurred: {} -> {}", status.as_u16(), text);
        }

        extract_answer(&text)
    }
}

fn first_choice_text(response: &GenerateResponse) -> Option<&str> {
    response
        .choices
        .as_ref()?
        .first()?
        .text
        .as_deref()
}

/// Pulls the answer out of a 200 body.
fn extract_answer(body: &str) -> String {
    let parsed: GenerateResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("could not parse query response: {}", e);
            return PARSING_ERROR.to_string();
        }
    };

    if parsed.choices.is_none() {
        return NO_RESPONSE.to_string();
    }
    match first_choice_text(&parsed) {
        Some(text) => text.to_string(),
        None => PARSING_ERROR.to_string(),
    }
}
