//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod key_value_store;
mod settings_store;
mod story_archive;
mod story_generator;

pub use key_value_store::{KeyValueStorePort, StorageError};
pub use settings_store::SettingsStorePort;
pub use story_archive::StoryArchivePort;
pub use story_generator::{
    ChatMessage, ChatRole, GenerationError, GrammarRequest, KeywordsRequest, PhraseRequest,
    StoryGeneratorPort, TranslationPairRequest,
};
