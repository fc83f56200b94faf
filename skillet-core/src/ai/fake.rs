//! Fake AI client for testing.
//!
//! Returns deterministic responses based on prompt matching, so tests run
//! without network access or API costs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use super::client::{AiClient, AiError};
use super::types::{ChatRequest, ChatResponse, Usage};

/// A fake AI client.
///
/// Responses are matched by checking whether the concatenated request
/// messages contain a registered substring. If no match is found, returns
/// the default response or an error.
pub struct FakeAiClient {
    /// Map of prompt substring -> response
    responses: RwLock<HashMap<String, String>>,
    /// Default response if no match found
    default_response: Option<String>,
}

impl Default for FakeAiClient {
    fn default() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: Some("{}".to_string()),
        }
    }
}

impl FakeAiClient {
    /// Create a fake with no registered responses and no default.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: None,
        }
    }

    /// Create a fake that returns `response` for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut client = Self::new();
        client.add_response(prompt_contains, response);
        client
    }

    /// Register a response for prompts containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .write()
            .unwrap()
            .insert(prompt_contains.to_string(), response.to_string());
    }

    /// Set the response returned when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }
}

#[async_trait]
impl AiClient for FakeAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, AiError> {
        let prompt: String = request
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
            .to_lowercase();

        let responses = self.responses.read().unwrap();
        for (pattern, response) in responses.iter() {
            if prompt.contains(&pattern.to_lowercase()) {
                return Ok(ChatResponse {
                    content: response.clone(),
                    usage: Usage::default(),
                });
            }
        }

        match &self.default_response {
            Some(response) => Ok(ChatResponse {
                content: response.clone(),
                usage: Usage::default(),
            }),
            None => {
                let snippet: String = prompt.chars().take(100).collect();
                Err(AiError::Api(format!(
                    "FakeAiClient: no response configured for prompt (first 100 chars): {}",
                    snippet
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ChatMessage;

    fn request(content: &str) -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage::user(content)],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn matches_substring_case_insensitively() {
        let client = FakeAiClient::with_response("HELLO", "world");
        let response = client.complete(request("say hello please")).await.unwrap();
        assert_eq!(response.content, "world");
    }

    #[tokio::test]
    async fn unmatched_prompt_without_default_errors() {
        let client = FakeAiClient::new();
        assert!(client.complete(request("anything")).await.is_err());
    }

    #[tokio::test]
    async fn unmatched_multibyte_prompt_errors_without_panicking() {
        let client = FakeAiClient::new();
        let err = client
            .complete(request(&"crème brûlée 日本語 ".repeat(20)))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no response configured"));
    }

    #[tokio::test]
    async fn unmatched_prompt_uses_default() {
        let client = FakeAiClient::new().with_default_response("fallback");
        let response = client.complete(request("anything")).await.unwrap();
        assert_eq!(response.content, "fallback");
    }
}
