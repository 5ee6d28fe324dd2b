//! Client for a Gemini-compatible `generateContent` endpoint.

use super::{GenerationError, StructureGenerator, manifest, prompt, validate::parse_structure};
use crate::config::GenerationConfig;
use crate::core::{Document, SiteStructure};
use crate::{debug, log};
use reqwest::Client;
use serde_json::{Value, json};
use std::fs;

/// Structure generator backed by the remote model.
///
/// Holds its own credential and HTTP client; constructed once from
/// `[generation]` and passed to whoever needs it.
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    preview_chars: usize,
    temperature: Option<f32>,
}

impl GeminiGenerator {
    /// Build a generator from config, resolving the API key from the
    /// configured environment variable, then from `api_key_file`.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let api_key = resolve_api_key(config)?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(GenerationError::Transport)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            preview_chars: config.preview_chars,
            temperature: config.temperature,
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    fn request_body(&self, documents: &[Document]) -> Result<Value, GenerationError> {
        let manifest = manifest(documents, self.preview_chars);
        let user_prompt = prompt::user_prompt(&manifest).map_err(GenerationError::Decode)?;

        let mut generation_config = json!({
            "responseMimeType": "application/json",
            "responseSchema": prompt::response_schema(),
        });
        if let Some(temperature) = self.temperature {
            generation_config["temperature"] = json!(temperature);
        }

        Ok(json!({
            "systemInstruction": { "parts": [{ "text": prompt::SYSTEM_INSTRUCTION }] },
            "contents": [{ "role": "user", "parts": [{ "text": user_prompt }] }],
            "generationConfig": generation_config,
        }))
    }

    async fn call(&self, documents: &[Document]) -> Result<SiteStructure, GenerationError> {
        let body = self.request_body(documents)?;
        debug!("generate"; "POST {} ({} documents)", self.url(), documents.len());

        let resp = self
            .client
            .post(self.url())
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(GenerationError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = resp.json().await.map_err(GenerationError::Transport)?;
        let text = response_text(&json).ok_or(GenerationError::EmptyResponse)?;
        parse_structure(&text)
    }
}

impl StructureGenerator for GeminiGenerator {
    async fn generate(&self, documents: &[Document]) -> Result<SiteStructure, GenerationError> {
        let result = self.call(documents).await;
        if let Err(e) = &result {
            log!("generate"; "structure generation failed: {}", e);
        }
        result
    }
}

/// Concatenated text of the first candidate's parts, if any.
fn response_text(json: &Value) -> Option<String> {
    let parts = json["candidates"].get(0)?["content"]["parts"].as_array()?;
    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    (!text.trim().is_empty()).then_some(text)
}

fn resolve_api_key(config: &GenerationConfig) -> Result<String, GenerationError> {
    if let Ok(key) = std::env::var(&config.api_key_env) {
        let key = key.trim();
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }

    if let Some(path) = &config.api_key_file {
        match fs::read_to_string(path) {
            Ok(key) if !key.trim().is_empty() => return Ok(key.trim().to_string()),
            Ok(_) => {}
            Err(e) => log!("generate"; "cannot read {}: {}", path.display(), e),
        }
    }

    Err(GenerationError::MissingCredential {
        env: config.api_key_env.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_document;
    use std::path::PathBuf;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn generator(endpoint: &str) -> GeminiGenerator {
        GeminiGenerator {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            model: "gemini-2.5-flash".into(),
            api_key: "test-key".into(),
            preview_chars: 500,
            temperature: None,
        }
    }

    fn candidate(text: &str) -> Value {
        json!({ "candidates": [ { "content": { "parts": [ { "text": text } ] } } ] })
    }

    fn documents() -> Vec<Document> {
        vec![
            test_document("index.md", "# Welcome"),
            test_document("guide.md", &"g".repeat(800)),
        ]
    }

    #[tokio::test]
    async fn test_generate_success() {
        let server = MockServer::start().await;
        let structure = json!({
            "siteTitle": "Acme Docs",
            "siteDescription": "Everything about Acme.",
            "navigation": [
                { "categoryName": "Welcome", "items": [ { "title": "Home", "fileName": "index.md" } ] }
            ]
        });

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "generationConfig": { "responseMimeType": "application/json" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate(&structure.to_string())))
            .expect(1)
            .mount(&server)
            .await;

        let result = generator(&server.uri()).generate(&documents()).await.unwrap();
        assert_eq!(result.site_title, "Acme Docs");
        assert_eq!(result.navigation[0].items[0].file_reference, "index.md");
    }

    #[test]
    fn test_preview_is_bounded() {
        let client = generator("http://unused");
        let body = client.request_body(&documents()).unwrap();
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();

        assert!(prompt.contains(&"g".repeat(500)));
        assert!(!prompt.contains(&"g".repeat(501)));
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = generator(&server.uri()).generate(&documents()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_empty_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let err = generator(&server.uri()).generate(&documents()).await.unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_malformed_json_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate("{\"siteTitle\": ")))
            .mount(&server)
            .await;

        let err = generator(&server.uri()).generate(&documents()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Decode(_)));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        // nothing listens on port 9 of the loopback interface
        let err = generator("http://127.0.0.1:9")
            .generate(&documents())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Transport(_)));
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let json = json!({ "candidates": [ { "content": { "parts": [
            { "text": "{\"a\":" }, { "text": "1}" }
        ] } } ] });
        assert_eq!(response_text(&json).as_deref(), Some("{\"a\":1}"));
        assert_eq!(response_text(&json!({})), None);
    }

    #[test]
    fn test_temperature_forwarded() {
        let mut client = generator("http://unused");
        client.temperature = Some(0.2);
        let body = client.request_body(&[]).unwrap();
        assert!(body["generationConfig"]["temperature"].is_number());
    }

    #[test]
    fn test_api_key_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let key_file = dir.path().join("key");
        fs::write(&key_file, "  file-key\n").unwrap();

        let config = GenerationConfig {
            api_key_env: "DOCUGEN_TEST_KEY_UNSET".into(),
            api_key_file: Some(key_file),
            ..GenerationConfig::default()
        };
        assert_eq!(resolve_api_key(&config).unwrap(), "file-key");
    }

    #[test]
    fn test_missing_credential() {
        let config = GenerationConfig {
            api_key_env: "DOCUGEN_TEST_KEY_UNSET".into(),
            api_key_file: Some(PathBuf::from("/nonexistent/key")),
            ..GenerationConfig::default()
        };
        let err = resolve_api_key(&config).unwrap_err();
        assert!(matches!(err, GenerationError::MissingCredential { .. }));
    }
}
