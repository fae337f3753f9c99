//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（StoryGenerator、StoryArchive、SettingsStore、KeyValueStore）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Story commands
    ClearArchive,
    ContinueStory,
    GenerateStory,
    // Settings commands
    SaveSettings,
    SetTheme,
    // Handlers
    handlers::{
        ClearArchiveHandler, ContinueStoryHandler, GenerateStoryHandler, SaveSettingsHandler,
        SetThemeHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Key-value substrate
    KeyValueStorePort,
    StorageError,
    // Stores
    SettingsStorePort,
    StoryArchivePort,
    // LLM
    ChatMessage,
    ChatRole,
    GenerationError,
    GrammarRequest,
    KeywordsRequest,
    PhraseRequest,
    StoryGeneratorPort,
    TranslationPairRequest,
};

pub use queries::{
    // Story queries
    GetStory,
    ListStories,
    // Settings queries
    GetSettings,
    GetTheme,
    // Assist queries
    AnalyzeTranslationPair,
    ExplainGrammar,
    ExplainPhrase,
    SuggestKeywords,
    // Handlers
    handlers::{AssistHandler, GetSettingsHandler, GetStoryHandler, GetThemeHandler, ListStoriesHandler},
};
