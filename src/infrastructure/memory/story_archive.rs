//! In-Memory Story Archive Implementation
//!
//! 内存中的有序列表为准，每次变更后整体写回 `story-archive` 记录
//!
//! 写回在释放列表锁之后进行（sled 写入会阻塞到 flush 完成），
//! 由 `persist_lock` 保证快照按变更顺序落盘

use parking_lot::{Mutex, RwLock, RwLockWriteGuard};
use std::sync::Arc;

use crate::application::ports::StoryArchivePort;
use crate::domain::generation::StoryGenerationParams;
use crate::domain::story::{ArchivedStory, GeneratedStory, StoryId, StoryParams};
use crate::infrastructure::persistence::{keys, JsonPersistence};

/// 内存故事归档
pub struct InMemoryStoryArchive {
    /// 最新在前
    stories: RwLock<Vec<ArchivedStory>>,
    persist_lock: Mutex<()>,
    persistence: JsonPersistence,
}

impl InMemoryStoryArchive {
    /// 从持久化记录加载归档，记录缺失或损坏时为空
    pub fn new(persistence: JsonPersistence) -> Self {
        let stories: Vec<ArchivedStory> = persistence.read(keys::STORY_ARCHIVE, Vec::new());

        tracing::info!(
            stories = stories.len(),
            persistent = persistence.is_available(),
            "Story archive loaded"
        );

        Self {
            stories: RwLock::new(stories),
            persist_lock: Mutex::new(()),
            persistence,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 取快照并释放列表锁后写回
    ///
    /// 先拿到 `persist_lock` 再释放列表锁，后发生的变更不会被先前的快照覆盖
    fn persist(&self, stories: RwLockWriteGuard<'_, Vec<ArchivedStory>>) {
        let snapshot = stories.clone();
        let _order = self.persist_lock.lock();
        drop(stories);

        self.persistence.write(keys::STORY_ARCHIVE, &snapshot);
    }
}

impl StoryArchivePort for InMemoryStoryArchive {
    fn list(&self) -> Vec<ArchivedStory> {
        self.stories.read().clone()
    }

    fn get(&self, id: &StoryId) -> Option<ArchivedStory> {
        self.stories.read().iter().find(|s| s.id() == id).cloned()
    }

    fn create(&self, generated: GeneratedStory, params: &StoryGenerationParams) -> ArchivedStory {
        let story = ArchivedStory::new(generated, StoryParams::from(params));

        let mut stories = self.stories.write();
        stories.insert(0, story.clone());
        self.persist(stories);

        tracing::info!(
            story_id = %story.id(),
            title = %story.title(),
            parts = story.part_count(),
            "Story archived"
        );

        story
    }

    fn update(&self, story: &ArchivedStory) -> bool {
        let mut stories = self.stories.write();
        let Some(slot) = stories.iter_mut().find(|s| s.id() == story.id()) else {
            tracing::debug!(story_id = %story.id(), "Story not in archive, update skipped");
            return false;
        };

        *slot = story.clone();
        self.persist(stories);

        tracing::info!(
            story_id = %story.id(),
            parts = story.part_count(),
            glossary = story.glossary().len(),
            "Story updated"
        );

        true
    }

    fn clear(&self) {
        let mut stories = self.stories.write();
        let removed = stories.len();
        stories.clear();
        self.persist(stories);

        tracing::info!(removed = removed, "Story archive cleared");
    }

    fn len(&self) -> usize {
        self.stories.read().len()
    }
}
