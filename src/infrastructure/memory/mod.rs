//! In-Memory Implementations
//!
//! 内存实现：键值存储、故事归档、用户设置

mod kv_store;
mod settings_store;
mod story_archive;

pub use kv_store::InMemoryKeyValueStore;
pub use settings_store::InMemorySettingsStore;
pub use story_archive::InMemoryStoryArchive;
