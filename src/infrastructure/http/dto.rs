//! Data Transfer Objects
//!
//! 请求/响应字段统一使用 camelCase

use serde::{Deserialize, Serialize};

use crate::application::ChatMessage;
use crate::domain::settings::{Theme, UserSettings};
use crate::domain::story::StoryId;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Settings DTOs
// ============================================================================

/// 设置响应，凭据只报告是否已设置
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub source_language: String,
    pub target_language: String,
    pub level: String,
    pub credential_set: bool,
}

impl From<UserSettings> for SettingsResponse {
    fn from(settings: UserSettings) -> Self {
        Self {
            credential_set: settings.has_credential(),
            source_language: settings.source_language,
            target_language: settings.target_language,
            level: settings.level,
        }
    }
}

/// 保存设置请求
///
/// 省略 `credential` 时保留当前凭据，空字符串表示清除
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSettingsRequest {
    #[serde(default)]
    pub source_language: String,
    #[serde(default)]
    pub target_language: String,
    #[serde(default)]
    pub level: String,
    #[serde(default, alias = "apiKey")]
    pub credential: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeBody {
    pub theme: Theme,
}

// ============================================================================
// Story DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StoryIdRequest {
    pub id: StoryId,
}

#[derive(Debug, Deserialize)]
pub struct GenerateStoryRequest {
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub prompt: String,
}

// ============================================================================
// Assist DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordsRequestBody {
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub target_language: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarRequestBody {
    pub word_or_phrase: String,
    pub language: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequestBody {
    pub source_phrase: String,
    pub target_phrase: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainPhraseRequestBody {
    pub phrase: String,
    #[serde(default)]
    pub context: String,
    pub source_language: String,
    pub target_language: String,
}

#[derive(Debug, Serialize)]
pub struct ExplanationResponse {
    pub explanation: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}
