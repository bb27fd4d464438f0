//! HTTP answer provider: POSTs `{"pergunta": ...}` to the configured
//! endpoint and reads the `resposta` field of the JSON reply.
//!
//! Wire types are private to this module. Any transport error, timeout,
//! non-2xx status or body without a string `resposta` is an [`AnswerError`];
//! the caller decides what the user sees.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::answer::AnswerError;

/// Adapter for the question-answering endpoint.
///
/// Constructed once at startup, then cheaply cloned because
/// `reqwest::Client` is an `Arc` internally.
#[derive(Debug, Clone)]
pub struct HttpAnswerer {
    client: Client,
    endpoint: String,
    timeout_seconds: u64,
}

impl HttpAnswerer {
    pub fn new(endpoint: String, timeout_seconds: u64) -> Result<Self, AnswerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| AnswerError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, endpoint, timeout_seconds })
    }

    /// One round-trip, no retry.
    pub async fn ask(&self, question: &str) -> Result<String, AnswerError> {
        let payload = ConsultaRequest { pergunta: question };

        debug!(endpoint = %self.endpoint, question_len = question.len(), "sending question");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(endpoint = %self.endpoint, error = %e, timeout = e.is_timeout(), "answer request failed (transport)");
                if e.is_timeout() {
                    AnswerError::Timeout { seconds: self.timeout_seconds }
                } else {
                    AnswerError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(error = %e, "failed to read answer body");
            if e.is_timeout() {
                AnswerError::Timeout { seconds: self.timeout_seconds }
            } else {
                AnswerError::Request(format!("failed to read response body: {e}"))
            }
        })?;

        if !status.is_success() {
            error!(%status, "answer service returned HTTP error");
            return Err(AnswerError::Status { status: status.as_u16(), body });
        }

        trace!(body = %body, "raw answer body");

        let parsed: ConsultaResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "failed to deserialize answer body");
            AnswerError::Decode(e.to_string())
        })?;

        Ok(parsed.resposta)
    }
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ConsultaRequest<'a> {
    pergunta: &'a str,
}

/// The service also echoes `pergunta`; only `resposta` is read.
#[derive(Debug, Deserialize)]
struct ConsultaResponse {
    resposta: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_shape() {
        let json = serde_json::to_value(ConsultaRequest { pergunta: "O que é IPCA?" }).unwrap();
        assert_eq!(json, serde_json::json!({ "pergunta": "O que é IPCA?" }));
    }

    #[test]
    fn response_ignores_extra_fields() {
        let r: ConsultaResponse =
            serde_json::from_str(r#"{"pergunta":"x","resposta":"y"}"#).unwrap();
        assert_eq!(r.resposta, "y");
    }

    #[test]
    fn response_requires_string_resposta() {
        assert!(serde_json::from_str::<ConsultaResponse>(r#"{"resposta":42}"#).is_err());
        assert!(serde_json::from_str::<ConsultaResponse>(r#"{"detail":"x"}"#).is_err());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_request_error() {
        // Port 1 on loopback refuses connections.
        let p = HttpAnswerer::new("http://127.0.0.1:1/consulta".into(), 2).unwrap();
        let err = p.ask("teste").await.unwrap_err();
        assert!(matches!(err, AnswerError::Request(_)));
    }
}
