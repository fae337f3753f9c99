//! Story Context - Entities

use serde::{Deserialize, Serialize};

/// 故事片段 - 生成的最小叙事单位
///
/// 不变量:
/// - 只由生成结果产生，创建后不可修改
/// - 在故事内只追加，不重排
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPart {
    /// 片段标题
    pub title: String,
    /// 目标语言正文
    pub content: String,
    /// 源语言译文
    pub translation: String,
}

impl StoryPart {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            translation: translation.into(),
        }
    }
}

/// 词汇表条目
///
/// `word` 是去重键（精确匹配，区分大小写）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryItem {
    pub word: String,
    pub definition: String,
}

impl GlossaryItem {
    pub fn new(word: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            definition: definition.into(),
        }
    }
}

/// 一次生成调用返回的结构化结果
///
/// 新故事和续写共用同一结构；续写时 `title` 不参与合并
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedStory {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub story_parts: Vec<StoryPart>,
    #[serde(default)]
    pub glossary: Vec<GlossaryItem>,
}
