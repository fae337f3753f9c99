//! Story Queries

use crate::domain::story::StoryId;

/// 列出归档故事
#[derive(Debug, Clone, Default)]
pub struct ListStories;

/// 获取单个故事
#[derive(Debug, Clone)]
pub struct GetStory {
    pub story_id: StoryId,
}
