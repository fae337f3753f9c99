//! Persistence Layer - 数据持久化
//!
//! Sled 键值存储与 JSON 记录适配器

pub mod json_store;
pub mod sled;

pub use self::json_store::{keys, JsonPersistence};
pub use self::sled::{SledKeyValueStore, SledStoreConfig};
