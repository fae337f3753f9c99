//! Story Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{merge_glossary, GeneratedStory, GlossaryItem, StoryId, StoryPart};
use crate::domain::generation::StoryGenerationParams;

/// 归档的生成参数
///
/// 不含凭据和故事历史：凭据只在请求内有效，历史可由 `storyParts` 还原
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryParams {
    pub prompt: String,
    #[serde(default)]
    pub genre: String,
    pub source_language: String,
    pub target_language: String,
    pub level: String,
}

impl From<&StoryGenerationParams> for StoryParams {
    fn from(params: &StoryGenerationParams) -> Self {
        Self {
            prompt: params.prompt.clone(),
            genre: params.genre.clone(),
            source_language: params.source_language.clone(),
            target_language: params.target_language.clone(),
            level: params.level.clone(),
        }
    }
}

/// ArchivedStory 聚合根
///
/// 不变量:
/// - id 创建时分配，之后不变
/// - story_parts 只增长，不缩短、不重排
/// - glossary 只增长，word 不重复
/// - params 创建后不可修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedStory {
    id: StoryId,
    title: String,
    story_parts: Vec<StoryPart>,
    glossary: Vec<GlossaryItem>,
    params: StoryParams,
    created_at: DateTime<Utc>,
}

impl ArchivedStory {
    /// 从生成结果创建归档故事，分配新 id
    ///
    /// 生成结果里重复的 word 只保留第一次出现的词条
    pub fn new(generated: GeneratedStory, params: StoryParams) -> Self {
        let glossary = merge_glossary(&[], &generated.glossary);
        Self {
            id: StoryId::new(),
            title: generated.title,
            story_parts: generated.story_parts,
            glossary,
            params,
            created_at: Utc::now(),
        }
    }

    /// 保留身份字段，替换正文和词汇表
    pub(super) fn with_content(&self, story_parts: Vec<StoryPart>, glossary: Vec<GlossaryItem>) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            story_parts,
            glossary,
            params: self.params.clone(),
            created_at: self.created_at,
        }
    }

    // Getters
    pub fn id(&self) -> &StoryId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn story_parts(&self) -> &[StoryPart] {
        &self.story_parts
    }

    pub fn glossary(&self) -> &[GlossaryItem] {
        &self.glossary
    }

    pub fn params(&self) -> &StoryParams {
        &self.params
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn part_count(&self) -> usize {
        self.story_parts.len()
    }
}
