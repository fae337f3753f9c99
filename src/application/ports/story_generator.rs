//! Story Generator Port - LLM 生成引擎抽象
//!
//! 定义结构化生成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::generation::{Credential, StoryGenerationParams};
use crate::domain::story::GeneratedStory;

/// 生成错误
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Missing API credential")]
    MissingCredential,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    /// 上游返回的非成功状态码
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 关键词建议请求
#[derive(Debug, Clone)]
pub struct KeywordsRequest {
    pub genre: String,
    pub target_language: String,
}

/// 语法讲解请求
#[derive(Debug, Clone)]
pub struct GrammarRequest {
    pub word_or_phrase: String,
    pub language: String,
}

/// 对话角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

/// 对话消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// 译文对分析请求
#[derive(Debug, Clone)]
pub struct TranslationPairRequest {
    pub source_phrase: String,
    pub target_phrase: String,
    /// 对话历史，最后一条应为用户消息
    pub history: Vec<ChatMessage>,
}

/// 短语释义请求
#[derive(Debug, Clone)]
pub struct PhraseRequest {
    pub phrase: String,
    pub context: String,
    pub source_language: String,
    pub target_language: String,
}

/// Story Generator Port
///
/// 外部 LLM 服务的抽象接口；失败时归档与合并都不会被调用
#[async_trait]
pub trait StoryGeneratorPort: Send + Sync {
    /// 生成新故事
    async fn generate_story(
        &self,
        params: &StoryGenerationParams,
    ) -> Result<GeneratedStory, GenerationError>;

    /// 基于 `story_history` 续写故事
    async fn continue_story(
        &self,
        params: &StoryGenerationParams,
    ) -> Result<GeneratedStory, GenerationError>;

    /// 根据体裁和目标语言建议关键词
    async fn suggest_keywords(
        &self,
        request: &KeywordsRequest,
        credential: Option<&Credential>,
    ) -> Result<Vec<String>, GenerationError>;

    /// 语法讲解（markdown）
    async fn explain_grammar(
        &self,
        request: &GrammarRequest,
        credential: Option<&Credential>,
    ) -> Result<String, GenerationError>;

    /// 围绕译文对的多轮问答（markdown）
    async fn analyze_translation_pair(
        &self,
        request: &TranslationPairRequest,
        credential: Option<&Credential>,
    ) -> Result<String, GenerationError>;

    /// 在上下文中解释选中的短语
    async fn explain_phrase(
        &self,
        request: &PhraseRequest,
        credential: Option<&Credential>,
    ) -> Result<String, GenerationError>;

    /// 检查生成服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
