//! Dummy answer provider: echoes the question back prefixed with `[echo]`.
//! Used for running the console without the remote service.

use crate::answer::AnswerError;

#[derive(Debug, Clone)]
pub struct DummyAnswerer;

impl DummyAnswerer {
    pub async fn ask(&self, question: &str) -> Result<String, AnswerError> {
        Ok(format!("[echo] {question}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ask_prefixes_echo() {
        assert_eq!(DummyAnswerer.ask("hello").await.unwrap(), "[echo] hello");
    }
}
