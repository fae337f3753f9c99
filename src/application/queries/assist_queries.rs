//! Assist Queries - 辅助学习流程
//!
//! 只读：调用 LLM，不修改归档或设置

use crate::application::ports::ChatMessage;

/// 关键词建议
#[derive(Debug, Clone)]
pub struct SuggestKeywords {
    pub genre: String,
    pub target_language: String,
}

/// 语法讲解
#[derive(Debug, Clone)]
pub struct ExplainGrammar {
    pub word_or_phrase: String,
    pub language: String,
}

/// 译文对问答
#[derive(Debug, Clone)]
pub struct AnalyzeTranslationPair {
    pub source_phrase: String,
    pub target_phrase: String,
    pub history: Vec<ChatMessage>,
}

/// 短语释义
#[derive(Debug, Clone)]
pub struct ExplainPhrase {
    pub phrase: String,
    pub context: String,
    pub source_language: String,
    pub target_language: String,
}
