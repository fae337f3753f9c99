//! Story Commands

use crate::domain::story::StoryId;

/// 生成新故事命令
///
/// 语言、等级和凭据取自当前设置
#[derive(Debug, Clone)]
pub struct GenerateStory {
    pub genre: String,
    pub prompt: String,
}

/// 续写故事命令
#[derive(Debug, Clone)]
pub struct ContinueStory {
    pub story_id: StoryId,
}

/// 清空归档命令
#[derive(Debug, Clone, Default)]
pub struct ClearArchive;
