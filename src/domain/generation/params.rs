//! Generation Context - 生成请求参数

use super::GenerationParamsError;
use crate::domain::story::StoryPart;

/// 新故事表单的最小提示词长度
pub const MIN_PROMPT_CHARS: usize = 10;

/// LLM API 凭据
///
/// 只在单次请求内有效，不可序列化，Debug 输出已脱敏
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// 空白字符串视为未提供
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// CEFR 语言等级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    pub const ALL: [CefrLevel; 6] = [
        CefrLevel::A1,
        CefrLevel::A2,
        CefrLevel::B1,
        CefrLevel::B2,
        CefrLevel::C1,
        CefrLevel::C2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|level| level.as_str() == s)
    }

    /// 该等级对应的词汇与语法复杂度说明
    pub fn guidance(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "Beginner: very simple phrases, basic vocabulary for immediate needs.",
            CefrLevel::A2 => "Elementary: simple, direct information exchange on familiar topics.",
            CefrLevel::B1 => "Intermediate: can describe experiences and give reasons for opinions.",
            CefrLevel::B2 => "Upper-Intermediate: can understand complex text, interact with fluency.",
            CefrLevel::C1 => "Advanced: flexible, effective language for social, academic and professional purposes.",
            CefrLevel::C2 => "Proficient: can understand with ease virtually everything heard or read.",
        }
    }
}

impl std::fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 新故事表单输入
#[derive(Debug, Clone, Default)]
pub struct NewStoryForm {
    pub genre: String,
    pub prompt: String,
}

/// 故事生成请求参数
///
/// `credential` 只属于本次请求，归档时会被丢弃
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryGenerationParams {
    pub prompt: String,
    pub genre: String,
    pub source_language: String,
    pub target_language: String,
    pub level: String,
    /// 续写时携带已有片段，新故事为 None
    pub story_history: Option<Vec<StoryPart>>,
    pub credential: Option<Credential>,
}

impl StoryGenerationParams {
    /// 请求未携带凭据时使用后备凭据
    pub fn with_fallback_credential(mut self, fallback: Option<&Credential>) -> Self {
        if self.credential.is_none() {
            self.credential = fallback.cloned();
        }
        self
    }

    /// 校验新故事请求
    ///
    /// 规则与前端表单一致：语言与体裁非空、等级为 A1..C2、提示词至少 10 个字符
    pub fn validate(&self) -> Result<(), GenerationParamsError> {
        if self.source_language.trim().is_empty() {
            return Err(GenerationParamsError::MissingSourceLanguage);
        }
        if self.target_language.trim().is_empty() {
            return Err(GenerationParamsError::MissingTargetLanguage);
        }
        if CefrLevel::from_str(self.level.trim()).is_none() {
            return Err(GenerationParamsError::InvalidLevel(self.level.clone()));
        }
        if self.genre.trim().is_empty() {
            return Err(GenerationParamsError::MissingGenre);
        }
        if self.prompt.trim().chars().count() < MIN_PROMPT_CHARS {
            return Err(GenerationParamsError::PromptTooShort(MIN_PROMPT_CHARS));
        }
        Ok(())
    }
}
