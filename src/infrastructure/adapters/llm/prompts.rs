//! Prompt Templates - 生成提示词与输出结构
//!
//! 每个生成流程由 system 指令、用户提示词和 JSON 输出 schema 组成

use serde_json::{json, Value};

use crate::application::ports::{
    GrammarRequest, KeywordsRequest, PhraseRequest, TranslationPairRequest,
};
use crate::domain::generation::{CefrLevel, StoryGenerationParams};

/// 一次结构化生成所需的提示信息
#[derive(Debug, Clone)]
pub struct PromptSpec {
    /// 流程名称（用于日志）
    pub name: &'static str,
    pub system: String,
    pub prompt: String,
    pub schema: Value,
}

const STORY_WRITER_PERSONA: &str = "You are a creative writer who specializes in generating personalized stories for language learners.";

fn cefr_guidance() -> String {
    CefrLevel::ALL
        .iter()
        .map(|level| format!("- {} {}", level.as_str(), level.guidance()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn story_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING", "description": "The title of the generated story." },
            "storyParts": {
                "type": "ARRAY",
                "description": "The story broken down into titled parts.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING", "description": "The title of this part of the story." },
                        "content": { "type": "STRING", "description": "The content of this part in the target language." },
                        "translation": { "type": "STRING", "description": "The translation of this part in the source language." }
                    },
                    "required": ["title", "content", "translation"]
                }
            },
            "glossary": {
                "type": "ARRAY",
                "description": "A glossary of terms from the story.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "word": { "type": "STRING", "description": "The word from the story." },
                        "definition": { "type": "STRING", "description": "The definition of the word." }
                    },
                    "required": ["word", "definition"]
                }
            }
        },
        "required": ["title", "storyParts", "glossary"]
    })
}

fn text_schema(field: &str, description: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            field: { "type": "STRING", "description": description }
        },
        "required": [field]
    })
}

/// 新故事
pub fn new_story(params: &StoryGenerationParams) -> PromptSpec {
    let prompt = format!(
        "Based on the prompt, genre, target language, and learner's level, generate a story that includes a coherent plot, translations, and a glossary of terms.\n\n\
         Prompt: {prompt}\n\
         Genre: {genre}\n\
         Source Language (for translations): {source}\n\
         Target Language: {target}\n\
         Learner Level (CEFR): {level}\n\n\
         The story should be engaging and tailored to the specified learning level.\n\
         CEFR levels guide vocabulary and grammar complexity:\n{guidance}\n\n\
         Break the story into multiple parts, each with a title, content in the target language, and a translation in the source language. \
         Include a glossary of key terms from the story with their definitions in the source language.",
        prompt = params.prompt,
        genre = params.genre,
        source = params.source_language,
        target = params.target_language,
        level = params.level,
        guidance = cefr_guidance(),
    );

    PromptSpec {
        name: "generate_story",
        system: STORY_WRITER_PERSONA.to_string(),
        prompt,
        schema: story_schema(),
    }
}

/// 续写
pub fn continue_story(params: &StoryGenerationParams) -> PromptSpec {
    let history = params
        .story_history
        .as_deref()
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, part)| format!("Part {} - {}\n{}", i + 1, part.title, part.content))
        .collect::<Vec<_>>()
        .join("\n\n");

    let prompt = format!(
        "Continue the story below for the same learner. Write the next parts only; do not repeat or rewrite earlier parts.\n\n\
         Original prompt: {prompt}\n\
         Genre: {genre}\n\
         Source Language (for translations): {source}\n\
         Target Language: {target}\n\
         Learner Level (CEFR): {level}\n\n\
         Story so far:\n{history}\n\n\
         Each new part needs a title, content in the target language, and a translation in the source language. \
         Include glossary entries only for key terms that appear in the new parts, defined in the source language.",
        prompt = params.prompt,
        genre = params.genre,
        source = params.source_language,
        target = params.target_language,
        level = params.level,
        history = history,
    );

    PromptSpec {
        name: "continue_story",
        system: STORY_WRITER_PERSONA.to_string(),
        prompt,
        schema: story_schema(),
    }
}

/// 关键词建议
pub fn keywords(request: &KeywordsRequest) -> PromptSpec {
    PromptSpec {
        name: "suggest_keywords",
        system: "You are a creative writing assistant.".to_string(),
        prompt: format!(
            "Suggest keywords for a story based on its genre and target language.\n\n\
             Genre: {}\nTarget Language: {}\n\n\
             Provide keywords relevant to the genre and suitable for a story in the target language, to help the user brainstorm the narrative.",
            request.genre, request.target_language
        ),
        schema: json!({
            "type": "OBJECT",
            "properties": {
                "keywords": {
                    "type": "ARRAY",
                    "description": "Relevant keywords for the story.",
                    "items": { "type": "STRING" }
                }
            },
            "required": ["keywords"]
        }),
    }
}

/// 语法讲解
pub fn grammar(request: &GrammarRequest) -> PromptSpec {
    PromptSpec {
        name: "explain_grammar",
        system: "You are an expert grammar teacher.".to_string(),
        prompt: format!(
            "Provide a grammar explanation for the following word or phrase in the given language, in markdown format.\n\n\
             Word or Phrase: {}\nLanguage: {}",
            request.word_or_phrase, request.language
        ),
        schema: text_schema("explanation", "The grammar explanation in markdown format."),
    }
}

/// 译文对问答
pub fn translation_pair(request: &TranslationPairRequest) -> PromptSpec {
    let history = request
        .history
        .iter()
        .map(|m| format!("{}: {}", m.role.as_str(), m.content))
        .collect::<Vec<_>>()
        .join("\n");

    PromptSpec {
        name: "analyze_translation_pair",
        system: "You are an expert linguist helping a user understand the nuances of a translation.".to_string(),
        prompt: format!(
            "The user is analyzing the following translation pair:\n\
             Source Phrase: {}\nTranslation: {}\n\n\
             Respond in clear, conversational markdown. Do not wrap the whole response in a code block.\n\
             Continue the conversation naturally based on the last user message.\n\n{}\nmodel:",
            request.source_phrase, request.target_phrase, history
        ),
        schema: text_schema("response", "The response to the user in markdown format."),
    }
}

/// 短语释义
pub fn phrase(request: &PhraseRequest) -> PromptSpec {
    PromptSpec {
        name: "explain_phrase",
        system: "You are a language tutor.".to_string(),
        prompt: format!(
            "The user has selected a phrase from a text they are reading in {target}. \
             Explain the meaning of the selected phrase within its context. Provide the explanation in {source}. Keep it concise, like a tooltip.\n\n\
             Context: \"{context}\"\nSelected Phrase: \"{phrase}\"",
            target = request.target_language,
            source = request.source_language,
            context = request.context,
            phrase = request.phrase,
        ),
        schema: text_schema("explanation", "A concise explanation of the phrase in the source language."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{ChatMessage, ChatRole};
    use crate::domain::story::StoryPart;

    fn params() -> StoryGenerationParams {
        StoryGenerationParams {
            prompt: "A cat who learns to fly".to_string(),
            genre: "Fantasy".to_string(),
            source_language: "English".to_string(),
            target_language: "French".to_string(),
            level: "A2".to_string(),
            story_history: None,
            credential: None,
        }
    }

    #[test]
    fn test_new_story_prompt_carries_params() {
        let spec = new_story(&params());
        assert!(spec.prompt.contains("A cat who learns to fly"));
        assert!(spec.prompt.contains("Target Language: French"));
        assert!(spec.prompt.contains("Learner Level (CEFR): A2"));
        assert!(spec.prompt.contains("C2 Proficient"));
        assert_eq!(spec.schema["required"][1], "storyParts");
    }

    #[test]
    fn test_continuation_prompt_includes_history() {
        let mut params = params();
        params.story_history = Some(vec![
            StoryPart::new("Le chat", "Il y avait un chat.", "There was a cat."),
            StoryPart::new("Le vol", "Le chat vole.", "The cat flies."),
        ]);

        let spec = continue_story(&params);
        assert!(spec.prompt.contains("Part 1 - Le chat"));
        assert!(spec.prompt.contains("Part 2 - Le vol\nLe chat vole."));
        assert!(!spec.prompt.contains("There was a cat."));
    }

    #[test]
    fn test_translation_pair_prompt_renders_history() {
        let spec = translation_pair(&TranslationPairRequest {
            source_phrase: "good morning".to_string(),
            target_phrase: "buenos días".to_string(),
            history: vec![
                ChatMessage { role: ChatRole::User, content: "Why plural?".to_string() },
            ],
        });
        assert!(spec.prompt.contains("user: Why plural?"));
        assert!(spec.prompt.ends_with("model:"));
    }
}
