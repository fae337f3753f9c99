//! Story Command Handlers

use std::sync::Arc;

use crate::application::commands::{ClearArchive, ContinueStory, GenerateStory};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    GenerationError, SettingsStorePort, StoryArchivePort, StoryGeneratorPort,
};
use crate::domain::generation::{for_continuation, for_new_story, Credential, NewStoryForm};
use crate::domain::story::{merge_continuation, ArchivedStory};

// ============================================================================
// GenerateStory
// ============================================================================

/// GenerateStory Handler - 校验表单、调用 LLM、归档
pub struct GenerateStoryHandler {
    archive: Arc<dyn StoryArchivePort>,
    settings: Arc<dyn SettingsStorePort>,
    generator: Arc<dyn StoryGeneratorPort>,
    /// 设置中没有凭据时使用的配置凭据
    fallback_credential: Option<Credential>,
}

impl GenerateStoryHandler {
    pub fn new(
        archive: Arc<dyn StoryArchivePort>,
        settings: Arc<dyn SettingsStorePort>,
        generator: Arc<dyn StoryGeneratorPort>,
        fallback_credential: Option<Credential>,
    ) -> Self {
        Self {
            archive,
            settings,
            generator,
            fallback_credential,
        }
    }

    pub async fn handle(&self, command: GenerateStory) -> Result<ArchivedStory, ApplicationError> {
        let form = NewStoryForm {
            genre: command.genre,
            prompt: command.prompt,
        };
        let params = for_new_story(&form, &self.settings.get())
            .with_fallback_credential(self.fallback_credential.as_ref());

        params.validate()?;

        tracing::info!(
            genre = %params.genre,
            target_language = %params.target_language,
            level = %params.level,
            "Generating story"
        );

        // 没有片段的新故事视为生成失败，不归档
        let generated = self
            .generator
            .generate_story(&params)
            .await
            .and_then(|generated| {
                if generated.story_parts.is_empty() {
                    Err(GenerationError::InvalidResponse("Story has no parts".to_string()))
                } else {
                    Ok(generated)
                }
            })
            .map_err(|e| {
                tracing::warn!(error = %e, "Story generation failed");
                ApplicationError::from(e)
            })?;

        Ok(self.archive.create(generated, &params))
    }
}

// ============================================================================
// ContinueStory
// ============================================================================

/// ContinueStory Handler - 以已有片段为历史续写，合并后写回归档
pub struct ContinueStoryHandler {
    archive: Arc<dyn StoryArchivePort>,
    settings: Arc<dyn SettingsStorePort>,
    generator: Arc<dyn StoryGeneratorPort>,
    fallback_credential: Option<Credential>,
}

impl ContinueStoryHandler {
    pub fn new(
        archive: Arc<dyn StoryArchivePort>,
        settings: Arc<dyn SettingsStorePort>,
        generator: Arc<dyn StoryGeneratorPort>,
        fallback_credential: Option<Credential>,
    ) -> Self {
        Self {
            archive,
            settings,
            generator,
            fallback_credential,
        }
    }

    pub async fn handle(&self, command: ContinueStory) -> Result<ArchivedStory, ApplicationError> {
        let story = self
            .archive
            .get(&command.story_id)
            .ok_or_else(|| ApplicationError::not_found("Story", &command.story_id))?;

        let params = for_continuation(&story, &self.settings.get())
            .with_fallback_credential(self.fallback_credential.as_ref());

        tracing::info!(
            story_id = %story.id(),
            parts = story.part_count(),
            "Continuing story"
        );

        let fresh = self.generator.continue_story(&params).await.map_err(|e| {
            tracing::warn!(story_id = %story.id(), error = %e, "Story continuation failed");
            ApplicationError::from(e)
        })?;

        if fresh.story_parts.is_empty() {
            tracing::info!(story_id = %story.id(), "Continuation returned no parts, archive untouched");
            return Ok(story);
        }

        let merged = merge_continuation(&story, &fresh);
        if !self.archive.update(&merged) {
            // 生成期间归档被清空
            tracing::warn!(story_id = %merged.id(), "Continued story no longer archived");
        }

        Ok(merged)
    }
}

// ============================================================================
// ClearArchive
// ============================================================================

/// ClearArchive Handler
pub struct ClearArchiveHandler {
    archive: Arc<dyn StoryArchivePort>,
}

impl ClearArchiveHandler {
    pub fn new(archive: Arc<dyn StoryArchivePort>) -> Self {
        Self { archive }
    }

    pub async fn handle(&self, _command: ClearArchive) -> Result<(), ApplicationError> {
        self.archive.clear();
        Ok(())
    }
}
