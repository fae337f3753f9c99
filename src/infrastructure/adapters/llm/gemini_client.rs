//! Gemini Client - 调用 Gemini generateContent API
//!
//! 实现 StoryGeneratorPort trait，所有流程都请求 JSON 输出并按 schema 解析
//!
//! 外部 API:
//! POST {base_url}/v1beta/models/{model}:generateContent
//! Header: x-goog-api-key
//! Request: {"systemInstruction": ..., "contents": [...], "generationConfig": {"responseMimeType": "application/json", "responseSchema": ...}}
//! Response: {"candidates": [{"content": {"parts": [{"text": "<json>"}]}}]}

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::prompts::{self, PromptSpec};
use crate::application::ports::{
    GenerationError, GrammarRequest, KeywordsRequest, PhraseRequest, StoryGeneratorPort,
    TranslationPairRequest,
};
use crate::domain::generation::{Credential, StoryGenerationParams};
use crate::domain::story::GeneratedStory;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KeywordsOutput {
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ExplanationOutput {
    explanation: String,
}

#[derive(Debug, Deserialize)]
struct ChatOutput {
    response: String,
}

/// Gemini 客户端配置
#[derive(Debug, Clone)]
pub struct GeminiClientConfig {
    /// API 基础 URL
    pub base_url: String,
    /// 故事生成、语法讲解、译文分析使用的模型
    pub model: String,
    /// 关键词和短语释义使用的轻量模型
    pub aux_model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 网络错误、超时和 5xx 的重试次数
    pub max_retries: u32,
}

impl Default for GeminiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            aux_model: "gemini-2.5-flash-lite".to_string(),
            timeout_secs: 120,
            max_retries: 1,
        }
    }
}

impl GeminiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_models(mut self, model: impl Into<String>, aux_model: impl Into<String>) -> Self {
        self.model = model.into();
        self.aux_model = aux_model.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}

/// Gemini 故事生成客户端
pub struct GeminiStoryGenerator {
    client: Client,
    config: GeminiClientConfig,
}

impl GeminiStoryGenerator {
    pub fn new(config: GeminiClientConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    fn models_url(&self) -> String {
        format!("{}/v1beta/models", self.config.base_url.trim_end_matches('/'))
    }

    /// 执行一次结构化生成，失败时按配置重试可恢复的错误
    async fn generate_json<T: DeserializeOwned>(
        &self,
        model: &str,
        spec: PromptSpec,
        credential: Option<&Credential>,
    ) -> Result<T, GenerationError> {
        let credential = credential.ok_or(GenerationError::MissingCredential)?;

        let mut attempt = 0;
        loop {
            match self.send(model, &spec, credential).await {
                Ok(text) => {
                    return serde_json::from_str(&text).map_err(|e| {
                        tracing::warn!(flow = spec.name, error = %e, "Model output does not match schema");
                        GenerationError::InvalidResponse(e.to_string())
                    });
                }
                Err(e) if attempt < self.config.max_retries && is_retryable(&e) => {
                    attempt += 1;
                    tracing::warn!(
                        flow = spec.name,
                        attempt = attempt,
                        error = %e,
                        "Generation request failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(500 * u64::from(attempt))).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send(
        &self,
        model: &str,
        spec: &PromptSpec,
        credential: &Credential,
    ) -> Result<String, GenerationError> {
        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![TextPart { text: &spec.system }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![TextPart { text: &spec.prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &spec.schema,
            },
        };

        tracing::debug!(
            flow = spec.name,
            model = model,
            prompt_len = spec.prompt.len(),
            "Sending generateContent request"
        );

        let response = self
            .client
            .post(self.generate_url(model))
            .header(API_KEY_HEADER, credential.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else if e.is_connect() {
                    GenerationError::NetworkError(format!("Cannot connect to Gemini API: {}", e))
                } else {
                    GenerationError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(map_status(status, error_text));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(format!("Malformed response: {}", e)))?;

        let text = payload
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect::<String>();

        if text.trim().is_empty() {
            return Err(GenerationError::InvalidResponse(
                "Response contains no text".to_string(),
            ));
        }

        tracing::info!(flow = spec.name, model = model, output_len = text.len(), "Generation completed");

        Ok(text)
    }
}

fn map_status(status: StatusCode, body: String) -> GenerationError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GenerationError::Unauthorized(format!("HTTP {}: {}", status, body))
        }
        StatusCode::BAD_REQUEST if body.contains("API_KEY_INVALID") => {
            GenerationError::Unauthorized(format!("HTTP {}: {}", status, body))
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GenerationError::Timeout,
        _ => GenerationError::HttpStatus {
            status: status.as_u16(),
            body,
        },
    }
}

fn is_retryable(error: &GenerationError) -> bool {
    match error {
        GenerationError::NetworkError(_) | GenerationError::Timeout => true,
        GenerationError::HttpStatus { status, .. } => {
            StatusCode::from_u16(*status).is_ok_and(|s| s.is_server_error() || s == StatusCode::TOO_MANY_REQUESTS)
        }
        _ => false,
    }
}

#[async_trait]
impl StoryGeneratorPort for GeminiStoryGenerator {
    async fn generate_story(
        &self,
        params: &StoryGenerationParams,
    ) -> Result<GeneratedStory, GenerationError> {
        self.generate_json(&self.config.model, prompts::new_story(params), params.credential.as_ref())
            .await
    }

    async fn continue_story(
        &self,
        params: &StoryGenerationParams,
    ) -> Result<GeneratedStory, GenerationError> {
        self.generate_json(
            &self.config.model,
            prompts::continue_story(params),
            params.credential.as_ref(),
        )
        .await
    }

    async fn suggest_keywords(
        &self,
        request: &KeywordsRequest,
        credential: Option<&Credential>,
    ) -> Result<Vec<String>, GenerationError> {
        let output: KeywordsOutput = self
            .generate_json(&self.config.aux_model, prompts::keywords(request), credential)
            .await?;
        Ok(output.keywords)
    }

    async fn explain_grammar(
        &self,
        request: &GrammarRequest,
        credential: Option<&Credential>,
    ) -> Result<String, GenerationError> {
        let output: ExplanationOutput = self
            .generate_json(&self.config.model, prompts::grammar(request), credential)
            .await?;
        Ok(output.explanation)
    }

    async fn analyze_translation_pair(
        &self,
        request: &TranslationPairRequest,
        credential: Option<&Credential>,
    ) -> Result<String, GenerationError> {
        let output: ChatOutput = self
            .generate_json(&self.config.model, prompts::translation_pair(request), credential)
            .await?;
        Ok(output.response)
    }

    async fn explain_phrase(
        &self,
        request: &PhraseRequest,
        credential: Option<&Credential>,
    ) -> Result<String, GenerationError> {
        let output: ExplanationOutput = self
            .generate_json(&self.config.aux_model, prompts::phrase(request), credential)
            .await?;
        Ok(output.explanation)
    }

    async fn health_check(&self) -> bool {
        // 无凭据时只检查连通性
        match self
            .client
            .get(self.models_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status() != StatusCode::NOT_FOUND && !response.status().is_server_error(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = GeminiClientConfig::default();
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_config_builder() {
        let config = GeminiClientConfig::new("http://localhost:9000/")
            .with_models("m", "aux")
            .with_timeout(30)
            .with_max_retries(0);
        assert_eq!(config.model, "m");
        assert_eq!(config.aux_model, "aux");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_retries, 0);

        let client = GeminiStoryGenerator::new(config).unwrap();
        assert_eq!(
            client.generate_url("m"),
            "http://localhost:9000/v1beta/models/m:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let schema = serde_json::json!({"type": "OBJECT"});
        let body = GenerateContentRequest {
            system_instruction: Content { role: None, parts: vec![TextPart { text: "sys" }] },
            contents: vec![Content { role: Some("user"), parts: vec![TextPart { text: "hi" }] }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &schema,
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "sys");
        assert!(json["systemInstruction"].get("role").is_none());
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(json["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            map_status(StatusCode::FORBIDDEN, String::new()),
            GenerationError::Unauthorized(_)
        ));
        assert!(matches!(
            map_status(StatusCode::BAD_REQUEST, "reason: API_KEY_INVALID".to_string()),
            GenerationError::Unauthorized(_)
        ));
        assert!(matches!(
            map_status(StatusCode::BAD_REQUEST, "bad schema".to_string()),
            GenerationError::HttpStatus { status: 400, .. }
        ));

        let unavailable = map_status(StatusCode::SERVICE_UNAVAILABLE, "overloaded".to_string());
        assert_eq!(unavailable.to_string(), "HTTP 503: overloaded");
        assert!(is_retryable(&unavailable));
        assert!(!is_retryable(&GenerationError::Unauthorized("x".to_string())));
    }

    #[test]
    fn test_retry_decided_by_status_code() {
        let status = |code: StatusCode| map_status(code, String::new());

        assert!(is_retryable(&status(StatusCode::TOO_MANY_REQUESTS)));
        assert!(is_retryable(&status(StatusCode::INTERNAL_SERVER_ERROR)));
        assert!(!is_retryable(&status(StatusCode::BAD_REQUEST)));
        assert!(!is_retryable(&status(StatusCode::NOT_FOUND)));

        // 消息文本不影响重试判断
        assert!(!is_retryable(&GenerationError::ServiceError("HTTP 503: overloaded".to_string())));
        assert!(!is_retryable(&GenerationError::HttpStatus {
            status: 404,
            body: "HTTP 500".to_string(),
        }));
    }

    #[tokio::test]
    async fn test_missing_credential_short_circuits() {
        let client = GeminiStoryGenerator::new(GeminiClientConfig::new("http://127.0.0.1:9")).unwrap();
        let params = StoryGenerationParams {
            prompt: "A dragon who bakes bread".to_string(),
            genre: "Fantasy".to_string(),
            source_language: "English".to_string(),
            target_language: "Italian".to_string(),
            level: "B1".to_string(),
            story_history: None,
            credential: None,
        };

        let result = client.generate_story(&params).await;
        assert!(matches!(result, Err(GenerationError::MissingCredential)));
    }
}
