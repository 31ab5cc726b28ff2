use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Question, SessionConfig};

/// Production endpoint for the question supply.
pub const DEFAULT_API_URL: &str = "https://opentdb.com/api.php";

/// Failure while fetching a question batch. Transport and decode problems are
/// both "fetch failed" to the user; the empty-batch case is not an error here
/// and is handled by the controller.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed with status {0}")]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct TriviaResponse {
    response_code: u8,
    results: Vec<Question>,
}

/// Client for the trivia question API.
#[derive(Clone)]
pub struct TriviaClient {
    client: reqwest::Client,
    base_url: String,
}

impl TriviaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Request one batch of multiple-choice questions matching the filters.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the request fails, the server answers with a
    /// non-success status, or the body cannot be decoded. An empty batch is a
    /// successful response.
    pub async fn fetch(&self, config: &SessionConfig) -> Result<Vec<Question>, FetchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("amount", config.amount.to_string()),
                ("category", config.category().id.to_string()),
                ("difficulty", config.difficulty.query_value().to_string()),
                ("type", "multiple".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body: TriviaResponse = response.json().await?;
        debug!(
            "api returned code {} with {} questions",
            body.response_code,
            body.results.len()
        );

        Ok(body.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_payload() {
        let payload = r#"{
            "response_code": 0,
            "results": [
                {
                    "category": "General Knowledge",
                    "type": "multiple",
                    "difficulty": "easy",
                    "question": "What is the &quot;Big Apple&quot;?",
                    "correct_answer": "New York City",
                    "incorrect_answers": ["Boston", "Chicago", "Los Angeles"]
                }
            ]
        }"#;

        let body: TriviaResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(body.response_code, 0);
        assert_eq!(body.results.len(), 1);

        let question = &body.results[0];
        assert_eq!(question.question, "What is the &quot;Big Apple&quot;?");
        assert_eq!(question.correct_answer, "New York City");
        assert_eq!(question.incorrect_answers.len(), 3);
    }

    #[test]
    fn test_deserialize_no_results() {
        let payload = r#"{"response_code": 1, "results": []}"#;
        let body: TriviaResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(body.response_code, 1);
        assert!(body.results.is_empty());
    }
}
