//! Question-answering provider abstraction.
//!
//! `Answerer` is an enum over concrete provider implementations.
//! Add a new variant + module in `providers/` for each additional backend.
//!
//! Provider instances are shared immutable capabilities; clone them freely.

pub mod providers;

use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("unknown answer provider: {0}")]
    UnknownProvider(String),
    #[error("answer request failed: {0}")]
    Request(String),
    #[error("answer service did not respond within {seconds}s")]
    Timeout { seconds: u64 },
    #[error("answer service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed answer body: {0}")]
    Decode(String),
}

impl AnswerError {
    /// `true` when the request never produced an HTTP response in time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, AnswerError::Timeout { .. })
    }
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// All available answering backends.
///
/// Enum dispatch avoids `dyn` trait objects and the `async-trait` dependency.
#[derive(Debug, Clone)]
pub enum Answerer {
    Http(providers::http::HttpAnswerer),
    Dummy(providers::dummy::DummyAnswerer),
}

impl Answerer {
    /// Send `question` to the provider and return its answer text.
    pub async fn ask(&self, question: &str) -> Result<String, AnswerError> {
        match self {
            Answerer::Http(p) => p.ask(question).await,
            Answerer::Dummy(p) => p.ask(question).await,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Answerer::Http(_) => "http",
            Answerer::Dummy(_) => "dummy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_detection() {
        assert!(AnswerError::Timeout { seconds: 1 }.is_timeout());
        assert!(!AnswerError::Request("timed out, but as text".into()).is_timeout());
        assert!(!AnswerError::Decode("x".into()).is_timeout());
    }

    #[tokio::test]
    async fn dummy_dispatch() {
        let a = Answerer::Dummy(providers::dummy::DummyAnswerer);
        assert_eq!(a.name(), "dummy");
        assert_eq!(a.ask("oi").await.unwrap(), "[echo] oi");
    }
}
