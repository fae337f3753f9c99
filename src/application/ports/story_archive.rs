//! Story Archive Port - 故事归档管理
//!
//! 定义故事归档的抽象接口，具体实现在 infrastructure/memory 层

use crate::domain::generation::StoryGenerationParams;
use crate::domain::story::{ArchivedStory, GeneratedStory, StoryId};

/// Story Archive Port
///
/// 归档列表按创建顺序倒序（最新在前），仅通过头部插入维护，不在读取时排序。
/// 所有操作都不会失败：持久化错误只记录日志，内存列表始终反映最近一次操作
pub trait StoryArchivePort: Send + Sync {
    /// 列出所有故事（最新在前）
    fn list(&self) -> Vec<ArchivedStory>;

    /// 根据 ID 获取故事
    fn get(&self, id: &StoryId) -> Option<ArchivedStory>;

    /// 创建故事：分配新 id，丢弃凭据，插入头部并持久化
    fn create(&self, generated: GeneratedStory, params: &StoryGenerationParams) -> ArchivedStory;

    /// 按 id 替换故事并持久化
    ///
    /// 未找到时不写入，返回 false
    fn update(&self, story: &ArchivedStory) -> bool;

    /// 清空归档并持久化
    fn clear(&self);

    /// 故事数量
    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
