//! In-Memory Key-Value Store Implementation

use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::{KeyValueStorePort, StorageError};

/// 内存键值存储
///
/// 进程退出后数据丢失，用于测试和禁用持久化的部署
pub struct InMemoryKeyValueStore {
    records: DashMap<String, String>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStorePort for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records.get(key).map(|v| v.clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
