//! Gemini API backend.
//!
//! Talks to the `generateContent` endpoint and implements all three quiz
//! capabilities on top of one text round trip.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use vocabquiz_core::traits::{
    parse_verdict, AnswerOracle, CheckRequest, ExampleGenerator, ExampleRequest, Verdict,
    VocabGenerator, VocabListRequest,
};

use crate::error::ProviderError;
use crate::prompts;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;

/// Gemini `generateContent` backend.
pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(api_key: &str, base_url: Option<String>, model: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            client,
        }
    }

    /// One prompt in, one block of text out.
    async fn generate_text(&self, prompt: &str) -> anyhow::Result<String> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    ProviderError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5)
                * 1000;
            return Err(ProviderError::RateLimited {
                retry_after_ms: retry_after,
            }
            .into());
        }
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::AuthenticationFailed(body).into());
        }
        if status == 404 {
            return Err(ProviderError::ModelNotFound(self.model.clone()).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ProviderError::ApiError { status, message }.into());
        }

        let api_response: GeminiResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status: 0,
                message: format!("failed to parse response: {e}"),
            })?;

        let text: String = api_response
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse.into());
        }
        Ok(text)
    }
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Deserialize)]
struct GeminiErrorBody {
    message: String,
}

#[async_trait]
impl AnswerOracle for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn check(&self, request: &CheckRequest) -> anyhow::Result<Verdict> {
        let text = self.generate_text(&prompts::check_prompt(request)).await?;
        Ok(parse_verdict(&text))
    }
}

#[async_trait]
impl ExampleGenerator for GeminiProvider {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn example(&self, request: &ExampleRequest) -> anyhow::Result<String> {
        let text = self
            .generate_text(&prompts::example_prompt(request))
            .await?;
        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl VocabGenerator for GeminiProvider {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn generate_list(&self, request: &VocabListRequest) -> anyhow::Result<String> {
        let text = self
            .generate_text(&prompts::vocab_list_prompt(request))
            .await?;
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocabquiz_core::model::Direction;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn check_request() -> CheckRequest {
        CheckRequest {
            question: "run".into(),
            user_answer: "chạy".into(),
            expected: "chạy".into(),
            word_type: "v".into(),
            direction: Direction::EnToVi,
        }
    }

    fn text_response(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": text}], "role": "model"}, "finishReason": "STOP"}
            ]
        })
    }

    #[tokio::test]
    async fn correct_answer_verdict() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(text_response("YES\nPerfect match.")),
            )
            .mount(&server)
            .await;

        let provider = GeminiProvider::new("test-key", Some(server.uri()), None);
        let verdict = provider.check(&check_request()).await.unwrap();
        assert!(verdict.is_correct);
        assert_eq!(verdict.explanation, "Perfect match.");
    }

    #[tokio::test]
    async fn incorrect_answer_verdict() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(text_response("NO\n'đi bộ' means to walk.")),
            )
            .mount(&server)
            .await;

        let provider = GeminiProvider::new("test-key", Some(server.uri()), None);
        let verdict = provider.check(&check_request()).await.unwrap();
        assert!(!verdict.is_correct);
        assert!(verdict.explanation.contains("walk"));
    }

    #[tokio::test]
    async fn example_sentence_is_trimmed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(text_response("  I run every morning.\n")),
            )
            .mount(&server)
            .await;

        let provider = GeminiProvider::new("test-key", Some(server.uri()), None);
        let sentence = provider
            .example(&ExampleRequest {
                word: "run".into(),
                word_type: "v".into(),
                meaning: "chạy".into(),
            })
            .await
            .unwrap();
        assert_eq!(sentence, "I run every morning.");
    }

    #[tokio::test]
    async fn custom_model_in_path() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response("YES\nok")))
            .mount(&server)
            .await;

        let provider = GeminiProvider::new(
            "test-key",
            Some(server.uri()),
            Some("gemini-2.5-flash".into()),
        );
        let verdict = provider.check(&check_request()).await.unwrap();
        assert!(verdict.is_correct);
    }

    #[tokio::test]
    async fn authentication_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let provider = GeminiProvider::new("bad-key", Some(server.uri()), None);
        let err = provider.check(&check_request()).await.unwrap_err();
        assert!(err.to_string().contains("authentication"));
    }

    #[tokio::test]
    async fn rate_limiting_carries_retry_after() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "5"))
            .mount(&server)
            .await;

        let provider = GeminiProvider::new("test-key", Some(server.uri()), None);
        let err = provider.check(&check_request()).await.unwrap_err();
        assert!(err.to_string().contains("retry after 5000ms"));
    }

    #[tokio::test]
    async fn api_error_message_is_extracted() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": {"code": 500, "message": "internal problem", "status": "INTERNAL"}
            })))
            .mount(&server)
            .await;

        let provider = GeminiProvider::new("test-key", Some(server.uri()), None);
        let err = provider.check(&check_request()).await.unwrap_err();
        assert!(err.to_string().contains("internal problem"));
    }

    #[tokio::test]
    async fn empty_candidates_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
            )
            .mount(&server)
            .await;

        let provider = GeminiProvider::new("test-key", Some(server.uri()), None);
        let err = provider.check(&check_request()).await.unwrap_err();
        assert!(err.to_string().contains("empty response"));
    }
}
