//! 生成请求组装
//!
//! 纯转换：从设置和归档状态构造请求参数，不发起 LLM 调用

use super::{Credential, NewStoryForm, StoryGenerationParams};
use crate::domain::settings::UserSettings;
use crate::domain::story::ArchivedStory;

/// 组装新故事请求
///
/// 体裁和提示词来自表单，语言、等级、凭据来自当前设置
pub fn for_new_story(form: &NewStoryForm, settings: &UserSettings) -> StoryGenerationParams {
    StoryGenerationParams {
        prompt: form.prompt.clone(),
        genre: form.genre.clone(),
        source_language: settings.source_language.clone(),
        target_language: settings.target_language.clone(),
        level: settings.level.clone(),
        story_history: None,
        credential: Credential::new(settings.credential.as_str()),
    }
}

/// 组装续写请求
///
/// 复用归档参数，历史为已有片段；凭据总是取自当前设置
pub fn for_continuation(story: &ArchivedStory, settings: &UserSettings) -> StoryGenerationParams {
    let params = story.params();
    StoryGenerationParams {
        prompt: params.prompt.clone(),
        genre: params.genre.clone(),
        source_language: params.source_language.clone(),
        target_language: params.target_language.clone(),
        level: params.level.clone(),
        story_history: Some(story.story_parts().to_vec()),
        credential: Credential::new(settings.credential.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::story::{GeneratedStory, StoryParams, StoryPart};

    fn settings() -> UserSettings {
        UserSettings {
            source_language: "Turkish".to_string(),
            target_language: "Japanese".to_string(),
            level: "B2".to_string(),
            credential: "key-123".to_string(),
        }
    }

    #[test]
    fn test_for_new_story() {
        let form = NewStoryForm {
            genre: "Mystery".to_string(),
            prompt: "A detective in a rainy city".to_string(),
        };

        let params = for_new_story(&form, &settings());

        assert_eq!(params.genre, "Mystery");
        assert_eq!(params.prompt, "A detective in a rainy city");
        assert_eq!(params.source_language, "Turkish");
        assert_eq!(params.target_language, "Japanese");
        assert_eq!(params.level, "B2");
        assert!(params.story_history.is_none());
        assert_eq!(params.credential.unwrap().expose(), "key-123");
    }

    #[test]
    fn test_for_new_story_without_credential() {
        let mut settings = settings();
        settings.credential = String::new();

        let params = for_new_story(&NewStoryForm::default(), &settings);
        assert!(params.credential.is_none());
    }

    #[test]
    fn test_for_continuation_reuses_stored_params() {
        let story = ArchivedStory::new(
            GeneratedStory {
                title: "Misterio".to_string(),
                story_parts: vec![
                    StoryPart::new("Ch1", "a", "a"),
                    StoryPart::new("Ch2", "b", "b"),
                ],
                glossary: vec![],
            },
            StoryParams {
                prompt: "stored prompt".to_string(),
                genre: "Mystery".to_string(),
                source_language: "English".to_string(),
                target_language: "Spanish".to_string(),
                level: "A2".to_string(),
            },
        );

        // 当前设置的语言与归档不同，续写仍沿用归档参数
        let params = for_continuation(&story, &settings());

        assert_eq!(params.prompt, "stored prompt");
        assert_eq!(params.source_language, "English");
        assert_eq!(params.target_language, "Spanish");
        assert_eq!(params.level, "A2");
        assert_eq!(params.story_history.as_deref(), Some(story.story_parts()));
        assert_eq!(params.credential.unwrap().expose(), "key-123");
    }
}
