//! Key-Value Store Port - 持久化键值存储抽象
//!
//! 以字符串为键的持久化存储，具体实现在 infrastructure/persistence (Sled) 与
//! infrastructure/memory (DashMap) 层

use thiserror::Error;

/// Key-Value Store 错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Key-Value Store Port
///
/// 同步接口，读写视为快速操作
pub trait KeyValueStorePort: Send + Sync {
    /// 读取原始值
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// 写入原始值（覆盖）
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// 将缓冲写入落盘
    fn flush(&self) -> Result<(), StorageError> {
        Ok(()) // 默认实现
    }
}
