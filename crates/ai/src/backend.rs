//! Remote content-generation backends
//!
//! Both providers speak the OpenAI-compatible chat completions shape,
//! so the request/response types are shared. The chat backend adds a
//! JSON response-format hint for structured generation; the search
//! backend adds the online-search controls its provider understands.
//!
//! Requests are single-shot with a configured timeout and no retries;
//! any failure is absorbed by the caller's local fallback.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use saarthi_config::AiConfig;
use saarthi_core::{ContentBackend, Result};

use crate::AiError;

/// Chat-completion backend for structured generation (explanations and
/// grievance templates).
pub struct ChatBackend {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
}

impl ChatBackend {
    pub fn new(config: &AiConfig) -> std::result::Result<Self, AiError> {
        let api_key = config
            .chat_api_key
            .clone()
            .ok_or_else(|| AiError::Configuration("Chat API key not configured".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.chat_endpoint.clone(),
            model: config.chat_model.clone(),
            api_key,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl ContentBackend for ChatBackend {
    async fn complete(&self, system: &str, user: &str, json_response: bool) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system),
                ChatMessage::user(user),
            ],
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
            response_format: json_response.then(ResponseFormat::json_object),
            search_domain_filter: None,
            search_recency_filter: None,
            stream: false,
        };

        let text = send_chat_request(
            &self.client,
            &format!("{}/chat/completions", self.endpoint),
            &self.api_key,
            &request,
        )
        .await?;
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Online-search backend for live scheme information.
pub struct SearchBackend {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
}

impl SearchBackend {
    pub fn new(config: &AiConfig) -> std::result::Result<Self, AiError> {
        let api_key = config
            .search_api_key
            .clone()
            .ok_or_else(|| AiError::Configuration("Search API key not configured".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.search_endpoint.clone(),
            model: config.search_model.clone(),
            api_key,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl ContentBackend for SearchBackend {
    async fn complete(&self, system: &str, user: &str, _json_response: bool) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system),
                ChatMessage::user(user),
            ],
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
            response_format: None,
            search_domain_filter: Some(vec!["perplexity.ai".to_string()]),
            search_recency_filter: Some("month".to_string()),
            stream: false,
        };

        let text = send_chat_request(
            &self.client,
            &format!("{}/chat/completions", self.endpoint),
            &self.api_key,
            &request,
        )
        .await?;
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

async fn send_chat_request(
    client: &Client,
    url: &str,
    api_key: &str,
    request: &ChatRequest,
) -> std::result::Result<String, AiError> {
    let response = client
        .post(url)
        .bearer_auth(api_key)
        .json(request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AiError::Api(format!("HTTP {}: {}", status, body)));
    }

    let response: ChatApiResponse = response
        .json()
        .await
        .map_err(|e| AiError::InvalidResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| AiError::InvalidResponse("Response contained no choices".to_string()))
}

// =============================================================================
// Chat completions API types
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_domain_filter: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_recency_filter: Option<String>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

impl ResponseFormat {
    fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatApiResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_backend_requires_key() {
        let config = AiConfig::default();
        assert!(matches!(
            ChatBackend::new(&config),
            Err(AiError::Configuration(_))
        ));
    }

    #[test]
    fn test_search_backend_requires_key() {
        let config = AiConfig::default();
        assert!(matches!(
            SearchBackend::new(&config),
            Err(AiError::Configuration(_))
        ));
    }

    #[test]
    fn test_json_request_serialization() {
        let request = ChatRequest {
            model: "gpt-4o".to_string(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hello")],
            max_tokens: Some(700),
            temperature: Some(0.2),
            response_format: Some(ResponseFormat::json_object()),
            search_domain_filter: None,
            search_recency_filter: None,
            stream: false,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""response_format":{"type":"json_object"}"#));
        assert!(!json.contains("search_domain_filter"));
    }

    #[test]
    fn test_search_request_serialization() {
        let request = ChatRequest {
            model: "llama-3.1-sonar-small-128k-online".to_string(),
            messages: vec![ChatMessage::user("scheme?")],
            max_tokens: Some(700),
            temperature: Some(0.2),
            response_format: None,
            search_domain_filter: Some(vec!["perplexity.ai".to_string()]),
            search_recency_filter: Some("month".to_string()),
            stream: false,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""search_recency_filter":"month""#));
        assert!(!json.contains("response_format"));
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Here you go."}}
            ]
        }"#;

        let response: ChatApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].message.content, "Here you go.");
    }
}
