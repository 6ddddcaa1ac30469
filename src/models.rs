//! Wire types exchanged with the inference server.

use serde::{Deserialize, Serialize};

/// Fixed request used by the health check.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
}

/// A question together with the full document collection.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest<'a> {
    pub documents: &'a [String],
    pub query: &'a str,
}

/// Response body of the generate endpoint. Only the fields this
/// application reads are modelled.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub choices: Option<Vec<Choice>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub text: Option<String>,
}
