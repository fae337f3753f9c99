//! JSON Persistence Adapter
//!
//! 在键值存储之上读写类型化记录。读失败回退到默认值，写失败只记录日志，
//! 调用方永远不会收到持久化错误

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::application::ports::KeyValueStorePort;

/// 持久化记录的键
pub mod keys {
    pub const STORY_ARCHIVE: &str = "story-archive";
    pub const USER_SETTINGS: &str = "user-settings";
    pub const THEME: &str = "theme";
}

/// JSON 持久化适配器
///
/// 存储不可用（`store` 为 None）时退化为仅会话内存
#[derive(Clone)]
pub struct JsonPersistence {
    store: Option<Arc<dyn KeyValueStorePort>>,
}

impl JsonPersistence {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { store: Some(store) }
    }

    /// 无底层存储，所有读取返回默认值，写入被丢弃
    pub fn unavailable() -> Self {
        Self { store: None }
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    /// 读取记录
    ///
    /// 记录不存在、存储不可用或反序列化失败时返回 `fallback`
    pub fn read<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let Some(store) = &self.store else {
            return fallback;
        };

        match store.get(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Corrupt record, using fallback");
                    fallback
                }
            },
            Ok(None) => fallback,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read record, using fallback");
                fallback
            }
        }
    }

    /// 写入记录
    ///
    /// 序列化或写入失败时只记录警告
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let Some(store) = &self.store else {
            return;
        };

        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to serialize record");
                return;
            }
        };

        if let Err(e) = store.set(key, &raw) {
            tracing::warn!(key = %key, error = %e, "Failed to write record");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::StorageError;
    use crate::domain::story::{ArchivedStory, GeneratedStory, GlossaryItem, StoryParams, StoryPart};
    use crate::infrastructure::memory::InMemoryKeyValueStore;

    /// 所有操作都失败的存储
    struct BrokenStore;

    impl KeyValueStorePort for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("broken".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::IoError("quota exceeded".to_string()))
        }
    }

    fn sample_story() -> ArchivedStory {
        ArchivedStory::new(
            GeneratedStory {
                title: "Le voyage".to_string(),
                story_parts: vec![StoryPart::new("Partie 1", "Il était une fois", "Once upon a time")],
                glossary: vec![GlossaryItem::new("voyage", "journey")],
            },
            StoryParams {
                prompt: "A journey across the sea".to_string(),
                genre: "Adventure".to_string(),
                source_language: "English".to_string(),
                target_language: "French".to_string(),
                level: "B1".to_string(),
            },
        )
    }

    #[test]
    fn test_round_trip() {
        let persistence = JsonPersistence::new(Arc::new(InMemoryKeyValueStore::new()));
        let stories = vec![sample_story()];

        persistence.write(keys::STORY_ARCHIVE, &stories);
        let back: Vec<ArchivedStory> = persistence.read(keys::STORY_ARCHIVE, Vec::new());

        assert_eq!(back, stories);
    }

    #[test]
    fn test_missing_key_returns_fallback() {
        let persistence = JsonPersistence::new(Arc::new(InMemoryKeyValueStore::new()));
        let value: Vec<ArchivedStory> = persistence.read(keys::STORY_ARCHIVE, Vec::new());
        assert!(value.is_empty());
    }

    #[test]
    fn test_corrupt_record_returns_fallback() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        store.set(keys::THEME, "{not json").unwrap();

        let persistence = JsonPersistence::new(store);
        let value: String = persistence.read(keys::THEME, "system".to_string());

        assert_eq!(value, "system");
    }

    #[test]
    fn test_broken_store_is_absorbed() {
        let persistence = JsonPersistence::new(Arc::new(BrokenStore));

        persistence.write(keys::THEME, "dark");
        let value: String = persistence.read(keys::THEME, "light".to_string());

        assert_eq!(value, "light");
    }

    #[test]
    fn test_unavailable_store() {
        let persistence = JsonPersistence::unavailable();
        assert!(!persistence.is_available());

        persistence.write(keys::THEME, "dark");
        let value: String = persistence.read(keys::THEME, "system".to_string());
        assert_eq!(value, "system");
    }
}
