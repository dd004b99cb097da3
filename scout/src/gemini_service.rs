use crate::config::GeminiConfig;
use crate::models::*;
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;

/// A hosted model that answers a single prompt.
pub trait SuggestionModel: Send + Sync {
    fn name(&self) -> &str;

    fn suggest<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Suggestion>> + Send + 'a>>;
}

pub struct GeminiService {
    client: Client,
    config: GeminiConfig,
}

impl GeminiService {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn generate_content(&self, prompt: &str) -> Result<Suggestion> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("GOOGLE_API_KEY environment variable not set"))?;

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: Some(GeminiGenerationConfig { temperature: 0.0 }),
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        log::info!(
            "Requesting suggestions from {} ({} prompt chars)",
            self.config.model,
            prompt.chars().count()
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| e.without_url())
            .context("Gemini request failed")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| e.without_url())
            .context("Failed to read Gemini response")?;

        if !status.is_success() {
            return Err(anyhow!("Gemini API error ({}): {}", status, body));
        }

        parse_response(&body)
    }
}

impl SuggestionModel for GeminiService {
    fn name(&self) -> &str {
        &self.config.model
    }

    fn suggest<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Suggestion>> + Send + 'a>> {
        Box::pin(self.generate_content(prompt))
    }
}

/// Normalizes a `generateContent` body. The text parts of the first candidate
/// carrying text are concatenated; a body without any text is passed through
/// as-is.
pub fn parse_response(body: &str) -> Result<Suggestion> {
    let response: GeminiResponse =
        serde_json::from_str(body).context("Malformed Gemini response")?;

    let text = response.candidates.iter().find_map(|candidate| {
        let parts: Vec<&str> = candidate
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.concat())
        }
    });

    Ok(match text {
        Some(text) => Suggestion::from_text(text),
        None => Suggestion::from_text(body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn config(base_url: String, api_key: Option<&str>) -> GeminiConfig {
        GeminiConfig {
            api_key: api_key.map(str::to_string),
            model: "gemini-test".to_string(),
            base_url,
        }
    }

    #[test]
    fn parse_concatenates_text_parts() {
        let body = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "1. Nature\n"}, {"text": "2. Science"}]
                }
            }]
        })
        .to_string();

        assert_eq!(parse_response(&body).unwrap().text(), "1. Nature\n2. Science");
    }

    #[test]
    fn parse_falls_back_to_raw_body_without_text() {
        let body = json!({"candidates": [], "promptFeedback": {"blockReason": "SAFETY"}})
            .to_string();

        assert_eq!(parse_response(&body).unwrap().text(), body);
    }

    #[test]
    fn parse_rejects_non_json() {
        let err = parse_response("<html>bad gateway</html>").unwrap_err();
        assert!(err.to_string().contains("Malformed"));
    }

    #[tokio::test]
    async fn missing_api_key_fails_on_call() {
        let service = GeminiService::new(config("http://127.0.0.1:9".to_string(), None));
        let err = service.suggest("prompt").await.unwrap_err();
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }

    #[tokio::test]
    async fn transport_errors_do_not_expose_api_key() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let closed = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let service = GeminiService::new(config(closed, Some("SUPERSECRETKEY")));
        let err = service.suggest("prompt").await.unwrap_err();
        let rendered = format!("{:#}", err);

        assert!(rendered.contains("Gemini request failed"));
        assert!(!rendered.contains("SUPERSECRETKEY"), "key leaked: {}", rendered);
    }

    #[tokio::test]
    async fn sends_prompt_with_zero_temperature() {
        let router = Router::new().route(
            "/v1beta/models/*action",
            post(
                |Path(action): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    assert!(action.ends_with("gemini-test:generateContent"));
                    assert_eq!(
                        headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()),
                        Some("secret")
                    );
                    assert_eq!(body["generationConfig"]["temperature"], json!(0.0));
                    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or("");
                    Json(json!({
                        "candidates": [{"content": {"parts": [{"text": format!("echo: {}", prompt)}]}}]
                    }))
                },
            ),
        );
        let base_url = spawn_stub(router).await;

        let service = GeminiService::new(config(base_url, Some("secret")));
        let suggestion = service.suggest("suggest journals").await.unwrap();
        assert_eq!(suggestion.text(), "echo: suggest journals");
    }

    #[tokio::test]
    async fn error_status_is_reported_with_body() {
        let router = Router::new().route(
            "/v1beta/models/*action",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "quota exhausted") }),
        );
        let base_url = spawn_stub(router).await;

        let service = GeminiService::new(config(base_url, Some("secret")));
        let err = service.suggest("prompt").await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("429"));
        assert!(message.contains("quota exhausted"));
    }
}
