//! Answer provider implementations.
//!
//! `build(config)` is the factory, called at startup.
//! Adding a new backend = new module + new match arm.

pub mod dummy;
pub mod http;

use crate::answer::{AnswerError, Answerer};
use crate::config::AnswerConfig;

/// Construct an `Answerer` from config.
pub fn build(config: &AnswerConfig) -> Result<Answerer, AnswerError> {
    match config.provider.as_str() {
        "dummy" => Ok(Answerer::Dummy(dummy::DummyAnswerer)),
        "http" => {
            let p = http::HttpAnswerer::new(config.endpoint.clone(), config.timeout_seconds)?;
            Ok(Answerer::Http(p))
        }
        _ => Err(AnswerError::UnknownProvider(config.provider.clone())),
    }
}
