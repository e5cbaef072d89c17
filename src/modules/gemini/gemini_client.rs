use async_trait::async_trait;
use serde_json::{json, Value};

use crate::core::config::GeminiConfig;

use super::{ChatModel, ChatModelError};

/// Client for the Generative Language `generateContent` endpoint
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            model: config.model,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn parse_reply(body: &Value) -> Option<String> {
        body.pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ChatModelError> {
        let api_key = self.api_key.as_deref().ok_or(ChatModelError::MissingApiKey)?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_url,
            self.model,
            urlencoding::encode(api_key)
        );
        let payload = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });

        tracing::debug!("Sending generateContent request to model {}", self.model);
        let response = self.client.post(&url).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatModelError::Status { status, body });
        }

        let body: Value = response.json().await?;
        Self::parse_reply(&body).ok_or(ChatModelError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::post, Json, Router};
    use std::collections::HashMap;

    async fn spawn_api(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1beta", addr)
    }

    fn client(api_url: String, api_key: Option<&str>) -> GeminiClient {
        GeminiClient::new(GeminiConfig {
            api_key: api_key.map(str::to_string),
            api_url,
            model: "gemini-test".to_string(),
        })
    }

    #[test]
    fn test_parse_reply_reads_first_candidate() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "Compost it!" }] } }]
        });
        assert_eq!(
            GeminiClient::parse_reply(&body).as_deref(),
            Some("Compost it!")
        );
        assert!(GeminiClient::parse_reply(&json!({ "candidates": [] })).is_none());
    }

    #[tokio::test]
    async fn test_generate_posts_prompt_and_returns_text() {
        let app = Router::new().route(
            "/v1beta/models/{action}",
            post(
                |axum::extract::Path(action): axum::extract::Path<String>,
                 Query(params): Query<HashMap<String, String>>,
                 Json(body): Json<Value>| async move {
                    assert_eq!(action, "gemini-test:generateContent");
                    assert_eq!(params.get("key").map(String::as_str), Some("secret"));
                    assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
                    Json(json!({
                        "candidates": [{ "content": { "parts": [{ "text": "Hi from GreenBot" }] } }]
                    }))
                },
            ),
        );
        let url = spawn_api(app).await;

        let reply = client(url, Some("secret")).generate("hello").await.unwrap();
        assert_eq!(reply, "Hi from GreenBot");
    }

    #[tokio::test]
    async fn test_generate_surfaces_http_errors() {
        let app = Router::new().route(
            "/v1beta/models/{action}",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "quota exceeded") }),
        );
        let url = spawn_api(app).await;

        let err = client(url, Some("secret")).generate("hello").await.unwrap_err();
        assert!(matches!(err, ChatModelError::Status { .. }));
    }

    #[tokio::test]
    async fn test_generate_without_key_fails_fast() {
        let gemini = client("http://127.0.0.1:1/v1beta".to_string(), None);
        assert!(!gemini.is_configured());
        assert!(matches!(
            gemini.generate("hello").await,
            Err(ChatModelError::MissingApiKey)
        ));
    }
}
