//! Assist Query Handlers
//!
//! 辅助流程的凭据与故事生成相同：设置中的凭据优先，其次是配置凭据

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    ChatRole, GrammarRequest, KeywordsRequest, PhraseRequest, SettingsStorePort,
    StoryGeneratorPort, TranslationPairRequest,
};
use crate::application::queries::{
    AnalyzeTranslationPair, ExplainGrammar, ExplainPhrase, SuggestKeywords,
};
use crate::domain::generation::Credential;

fn require(value: &str, field: &str) -> Result<(), ApplicationError> {
    if value.trim().is_empty() {
        return Err(ApplicationError::validation(format!("{} 不能为空", field)));
    }
    Ok(())
}

/// 辅助流程共享的依赖
pub struct AssistHandler {
    settings: Arc<dyn SettingsStorePort>,
    generator: Arc<dyn StoryGeneratorPort>,
    fallback_credential: Option<Credential>,
}

impl AssistHandler {
    pub fn new(
        settings: Arc<dyn SettingsStorePort>,
        generator: Arc<dyn StoryGeneratorPort>,
        fallback_credential: Option<Credential>,
    ) -> Self {
        Self {
            settings,
            generator,
            fallback_credential,
        }
    }

    fn credential(&self) -> Option<Credential> {
        Credential::new(self.settings.get().credential).or_else(|| self.fallback_credential.clone())
    }

    /// 关键词建议
    pub async fn suggest_keywords(&self, query: SuggestKeywords) -> Result<Vec<String>, ApplicationError> {
        require(&query.genre, "genre")?;
        require(&query.target_language, "targetLanguage")?;

        let request = KeywordsRequest {
            genre: query.genre,
            target_language: query.target_language,
        };
        let keywords = self
            .generator
            .suggest_keywords(&request, self.credential().as_ref())
            .await?;

        tracing::debug!(genre = %request.genre, count = keywords.len(), "Keywords suggested");
        Ok(keywords)
    }

    /// 语法讲解
    pub async fn explain_grammar(&self, query: ExplainGrammar) -> Result<String, ApplicationError> {
        require(&query.word_or_phrase, "wordOrPhrase")?;
        require(&query.language, "language")?;

        let request = GrammarRequest {
            word_or_phrase: query.word_or_phrase,
            language: query.language,
        };
        Ok(self
            .generator
            .explain_grammar(&request, self.credential().as_ref())
            .await?)
    }

    /// 译文对问答，历史的最后一条必须是用户消息
    pub async fn analyze_translation_pair(
        &self,
        query: AnalyzeTranslationPair,
    ) -> Result<String, ApplicationError> {
        require(&query.source_phrase, "sourcePhrase")?;
        require(&query.target_phrase, "targetPhrase")?;
        match query.history.last() {
            Some(message) if message.role == ChatRole::User => {}
            _ => {
                return Err(ApplicationError::validation(
                    "history 的最后一条必须是用户消息",
                ))
            }
        }

        let request = TranslationPairRequest {
            source_phrase: query.source_phrase,
            target_phrase: query.target_phrase,
            history: query.history,
        };
        Ok(self
            .generator
            .analyze_translation_pair(&request, self.credential().as_ref())
            .await?)
    }

    /// 短语释义
    pub async fn explain_phrase(&self, query: ExplainPhrase) -> Result<String, ApplicationError> {
        require(&query.phrase, "phrase")?;
        require(&query.source_language, "sourceLanguage")?;
        require(&query.target_language, "targetLanguage")?;

        let request = PhraseRequest {
            phrase: query.phrase,
            context: query.context,
            source_language: query.source_language,
            target_language: query.target_language,
        };
        Ok(self
            .generator
            .explain_phrase(&request, self.credential().as_ref())
            .await?)
    }
}
