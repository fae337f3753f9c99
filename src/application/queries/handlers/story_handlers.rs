//! Story Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::StoryArchivePort;
use crate::application::queries::{GetStory, ListStories};
use crate::domain::story::ArchivedStory;

/// ListStories Handler
pub struct ListStoriesHandler {
    archive: Arc<dyn StoryArchivePort>,
}

impl ListStoriesHandler {
    pub fn new(archive: Arc<dyn StoryArchivePort>) -> Self {
        Self { archive }
    }

    pub async fn handle(&self, _query: ListStories) -> Result<Vec<ArchivedStory>, ApplicationError> {
        Ok(self.archive.list())
    }
}

/// GetStory Handler
pub struct GetStoryHandler {
    archive: Arc<dyn StoryArchivePort>,
}

impl GetStoryHandler {
    pub fn new(archive: Arc<dyn StoryArchivePort>) -> Self {
        Self { archive }
    }

    pub async fn handle(&self, query: GetStory) -> Result<ArchivedStory, ApplicationError> {
        self.archive
            .get(&query.story_id)
            .ok_or_else(|| ApplicationError::not_found("Story", &query.story_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::StoryGenerationParams;
    use crate::domain::story::{GeneratedStory, StoryId};
    use crate::infrastructure::memory::InMemoryStoryArchive;
    use crate::infrastructure::persistence::JsonPersistence;

    fn params() -> StoryGenerationParams {
        StoryGenerationParams {
            prompt: "Two friends open a bakery".to_string(),
            genre: "Slice of Life".to_string(),
            source_language: "English".to_string(),
            target_language: "Dutch".to_string(),
            level: "A1".to_string(),
            story_history: None,
            credential: None,
        }
    }

    #[tokio::test]
    async fn test_list_and_get() {
        let archive = InMemoryStoryArchive::new(JsonPersistence::unavailable()).arc();
        let a = archive.create(GeneratedStory { title: "A".to_string(), ..Default::default() }, &params());
        let b = archive.create(GeneratedStory { title: "B".to_string(), ..Default::default() }, &params());

        let list = ListStoriesHandler::new(archive.clone())
            .handle(ListStories)
            .await
            .unwrap();
        assert_eq!(list, vec![b, a.clone()]);

        let found = GetStoryHandler::new(archive.clone())
            .handle(GetStory { story_id: a.id().clone() })
            .await
            .unwrap();
        assert_eq!(found, a);

        let missing = GetStoryHandler::new(archive)
            .handle(GetStory { story_id: StoryId::new() })
            .await;
        assert!(matches!(missing, Err(ApplicationError::NotFound { resource_type: "Story", .. })));
    }
}
