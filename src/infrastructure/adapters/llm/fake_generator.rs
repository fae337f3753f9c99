//! Fake Story Generator - 用于测试和离线运行的生成器
//!
//! 根据请求参数确定性地产出故事，不调用外部服务

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{
    GenerationError, GrammarRequest, KeywordsRequest, PhraseRequest, StoryGeneratorPort,
    TranslationPairRequest,
};
use crate::domain::generation::{Credential, StoryGenerationParams};
use crate::domain::story::{GeneratedStory, GlossaryItem, StoryPart};

/// Fake 生成器配置
#[derive(Debug, Clone)]
pub struct FakeStoryGeneratorConfig {
    /// 新故事的片段数
    pub parts_per_story: usize,
    /// 模拟推理延迟（毫秒）
    pub delay_ms: u64,
    /// 是否像真实服务一样要求凭据
    pub require_credential: bool,
}

impl Default for FakeStoryGeneratorConfig {
    fn default() -> Self {
        Self {
            parts_per_story: 2,
            delay_ms: 0,
            require_credential: true,
        }
    }
}

/// Fake Story Generator
pub struct FakeStoryGenerator {
    config: FakeStoryGeneratorConfig,
    calls: AtomicUsize,
    last_params: Mutex<Option<StoryGenerationParams>>,
    next_continuation: Mutex<Option<GeneratedStory>>,
    failure: Mutex<Option<String>>,
}

impl FakeStoryGenerator {
    pub fn new(config: FakeStoryGeneratorConfig) -> Self {
        Self {
            config,
            calls: AtomicUsize::new(0),
            last_params: Mutex::new(None),
            next_continuation: Mutex::new(None),
            failure: Mutex::new(None),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeStoryGeneratorConfig::default())
    }

    /// 下一次续写返回指定内容
    pub fn set_next_continuation(&self, story: GeneratedStory) {
        *self.next_continuation.lock() = Some(story);
    }

    /// 之后的调用都以服务错误失败，传入 None 恢复
    pub fn set_failure(&self, message: Option<&str>) {
        *self.failure.lock() = message.map(str::to_string);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 最近一次故事生成/续写的参数
    pub fn last_params(&self) -> Option<StoryGenerationParams> {
        self.last_params.lock().clone()
    }

    async fn begin(&self, credential: Option<&Credential>) -> Result<(), GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.config.delay_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.delay_ms)).await;
        }

        if let Some(message) = self.failure.lock().clone() {
            return Err(GenerationError::ServiceError(message));
        }
        if self.config.require_credential && credential.is_none() {
            return Err(GenerationError::MissingCredential);
        }
        Ok(())
    }
}

#[async_trait]
impl StoryGeneratorPort for FakeStoryGenerator {
    async fn generate_story(
        &self,
        params: &StoryGenerationParams,
    ) -> Result<GeneratedStory, GenerationError> {
        *self.last_params.lock() = Some(params.clone());
        self.begin(params.credential.as_ref()).await?;

        let story_parts = (1..=self.config.parts_per_story)
            .map(|n| {
                StoryPart::new(
                    format!("Part {}", n),
                    format!("[{}] {} ({})", params.target_language, params.prompt, n),
                    format!("[{}] {} ({})", params.source_language, params.prompt, n),
                )
            })
            .collect();

        tracing::debug!(prompt_len = params.prompt.len(), "FakeStoryGenerator: generating story");

        Ok(GeneratedStory {
            title: format!("{}: {}", params.genre, params.prompt),
            story_parts,
            glossary: vec![GlossaryItem::new("palabra", "word")],
        })
    }

    async fn continue_story(
        &self,
        params: &StoryGenerationParams,
    ) -> Result<GeneratedStory, GenerationError> {
        *self.last_params.lock() = Some(params.clone());
        self.begin(params.credential.as_ref()).await?;

        if let Some(story) = self.next_continuation.lock().take() {
            return Ok(story);
        }

        let next = params.story_history.as_ref().map_or(0, Vec::len) + 1;

        tracing::debug!(next_part = next, "FakeStoryGenerator: continuing story");

        Ok(GeneratedStory {
            title: String::new(),
            story_parts: vec![StoryPart::new(
                format!("Part {}", next),
                format!("[{}] continued ({})", params.target_language, next),
                format!("[{}] continued ({})", params.source_language, next),
            )],
            glossary: vec![
                GlossaryItem::new("palabra", "word, again"),
                GlossaryItem::new(format!("nuevo{}", next), "new"),
            ],
        })
    }

    async fn suggest_keywords(
        &self,
        request: &KeywordsRequest,
        credential: Option<&Credential>,
    ) -> Result<Vec<String>, GenerationError> {
        self.begin(credential).await?;
        Ok(vec![
            request.genre.to_lowercase(),
            request.target_language.to_lowercase(),
            "adventure".to_string(),
        ])
    }

    async fn explain_grammar(
        &self,
        request: &GrammarRequest,
        credential: Option<&Credential>,
    ) -> Result<String, GenerationError> {
        self.begin(credential).await?;
        Ok(format!("**{}** ({})", request.word_or_phrase, request.language))
    }

    async fn analyze_translation_pair(
        &self,
        request: &TranslationPairRequest,
        credential: Option<&Credential>,
    ) -> Result<String, GenerationError> {
        self.begin(credential).await?;
        let question = request.history.last().map(|m| m.content.as_str()).unwrap_or_default();
        Ok(format!(
            "{} -> {}: {}",
            request.source_phrase, request.target_phrase, question
        ))
    }

    async fn explain_phrase(
        &self,
        request: &PhraseRequest,
        credential: Option<&Credential>,
    ) -> Result<String, GenerationError> {
        self.begin(credential).await?;
        Ok(format!("'{}' in {}", request.phrase, request.source_language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(credential: Option<Credential>) -> StoryGenerationParams {
        StoryGenerationParams {
            prompt: "A lighthouse keeper".to_string(),
            genre: "Mystery".to_string(),
            source_language: "English".to_string(),
            target_language: "Spanish".to_string(),
            level: "B2".to_string(),
            story_history: None,
            credential,
        }
    }

    #[tokio::test]
    async fn test_generate_is_deterministic() {
        let fake = FakeStoryGenerator::with_defaults();
        let story = fake.generate_story(&params(Credential::new("k"))).await.unwrap();

        assert_eq!(story.title, "Mystery: A lighthouse keeper");
        assert_eq!(story.story_parts.len(), 2);
        assert_eq!(fake.call_count(), 1);
    }

    #[tokio::test]
    async fn test_requires_credential() {
        let fake = FakeStoryGenerator::with_defaults();
        let result = fake.generate_story(&params(None)).await;
        assert!(matches!(result, Err(GenerationError::MissingCredential)));
    }

    #[tokio::test]
    async fn test_failure_toggle() {
        let fake = FakeStoryGenerator::with_defaults();
        fake.set_failure(Some("boom"));
        assert!(fake.generate_story(&params(Credential::new("k"))).await.is_err());

        fake.set_failure(None);
        assert!(fake.generate_story(&params(Credential::new("k"))).await.is_ok());
    }
}
