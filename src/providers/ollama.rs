//! Ollama provider using the non-streaming `/api/generate` endpoint.
//!
//! Request: `{"model": ..., "prompt": ..., "stream": false}`.
//! Response: a JSON object whose `response` field holds the generated text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::ModelConfig;
use crate::error::{PromptCacheError, Result};

use super::TextGenerator;

/// Ollama REST provider for a single model.
pub struct OllamaProvider {
    base_url: String,
    model: String,
    client: Client,
}

impl std::fmt::Debug for OllamaProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl OllamaProvider {
    /// Build a provider for `model` at `base_url` with no request timeout.
    pub fn new(base_url: &str, model: &str) -> Result<Self> {
        Self::with_timeout(base_url, model, None)
    }

    pub fn with_timeout(base_url: &str, model: &str, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client: Self::build_client(timeout)?,
        })
    }

    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        Self::with_timeout(
            &config.base_url,
            &config.name,
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    fn build_client(timeout: Option<Duration>) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| PromptCacheError::Config(format!("Failed to build HTTP client: {}", e)))
    }

    fn api_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    /// Build the `/api/generate` request body.
    pub fn build_request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        })
    }

    /// Pull the generated text out of a response body.
    ///
    /// A missing or non-string `response` field is a malformed response.
    pub fn extract_text(json: &Value) -> Result<String> {
        json["response"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| {
                PromptCacheError::Provider(
                    "Malformed Ollama response: missing \"response\" field".to_string(),
                )
            })
    }
}

#[async_trait]
impl TextGenerator for OllamaProvider {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(model = %self.model, prompt_len = prompt.len(), "Ollama generate request");

        let response = self
            .client
            .post(self.api_url())
            .json(&self.build_request_body(prompt))
            .send()
            .await
            .map_err(|e| PromptCacheError::Provider(format!("Ollama request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            // Ollama reports failures as {"error": "..."}.
            let msg = serde_json::from_str::<Value>(&error_text)
                .ok()
                .and_then(|v| v["error"].as_str().map(String::from))
                .unwrap_or(error_text);
            return Err(PromptCacheError::Provider(format!(
                "Ollama API error ({}): {}",
                status.as_u16(),
                msg
            )));
        }

        let json: Value = response.json().await.map_err(|e| {
            PromptCacheError::Provider(format!("Failed to parse Ollama response: {}", e))
        })?;

        Self::extract_text(&json)
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a random local port and return its base URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 16 * 1024];
            let _ = stream.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_request_body() {
        let provider = OllamaProvider::new("http://localhost:11434", "gemma3:1b").unwrap();
        let body = provider.build_request_body("hi");
        assert_eq!(body["model"], "gemma3:1b");
        assert_eq!(body["prompt"], "hi");
        assert_eq!(body["stream"], false);
    }

    #[test]
    fn test_api_url_strips_trailing_slash() {
        let provider = OllamaProvider::new("http://localhost:11434/", "m").unwrap();
        assert_eq!(provider.api_url(), "http://localhost:11434/api/generate");
    }

    #[test]
    fn test_extract_text() {
        let json = json!({"model": "m", "response": "HELLO", "done": true});
        assert_eq!(OllamaProvider::extract_text(&json).unwrap(), "HELLO");
    }

    #[test]
    fn test_extract_text_empty_is_ok() {
        let json = json!({"response": ""});
        assert_eq!(OllamaProvider::extract_text(&json).unwrap(), "");
    }

    #[test]
    fn test_extract_text_missing_field() {
        let json = json!({"done": true});
        let err = OllamaProvider::extract_text(&json).unwrap_err();
        assert!(matches!(err, PromptCacheError::Provider(_)));
    }

    #[test]
    fn test_from_config() {
        let cfg = ModelConfig {
            name: "llama3.2".into(),
            base_url: "http://gpu-box:11434".into(),
            timeout_secs: Some(5),
        };
        let provider = OllamaProvider::from_config(&cfg).unwrap();
        assert_eq!(provider.model(), "llama3.2");
        assert_eq!(provider.name(), "ollama");
    }

    #[test]
    fn test_debug_output() {
        let provider = OllamaProvider::new("http://localhost:11434", "gemma3:1b").unwrap();
        let dbg = format!("{:?}", provider);
        assert!(dbg.contains("gemma3:1b"));
    }

    #[tokio::test]
    async fn test_generate_success() {
        let base = serve_once("200 OK", r#"{"model":"m","response":"HELLO","done":true}"#).await;
        let provider = OllamaProvider::new(&base, "m").unwrap();
        assert_eq!(provider.generate("hi").await.unwrap(), "HELLO");
    }

    #[tokio::test]
    async fn test_generate_api_error() {
        let base = serve_once("404 Not Found", r#"{"error":"model 'm' not found"}"#).await;
        let provider = OllamaProvider::new(&base, "m").unwrap();
        let err = provider.generate("hi").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("404"), "{msg}");
        assert!(msg.contains("model 'm' not found"), "{msg}");
    }

    #[tokio::test]
    async fn test_generate_malformed_response() {
        let base = serve_once("200 OK", r#"{"done":true}"#).await;
        let provider = OllamaProvider::new(&base, "m").unwrap();
        let err = provider.generate("hi").await.unwrap_err();
        assert!(err.to_string().contains("Malformed"));
    }

    #[tokio::test]
    async fn test_generate_unreachable() {
        // Bind then drop to get a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let provider = OllamaProvider::new(&format!("http://{}", addr), "m").unwrap();
        let err = provider.generate("hi").await.unwrap_err();
        assert!(err.to_string().contains("Ollama request failed"));
    }
}
