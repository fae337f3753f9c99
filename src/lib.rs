//! LinguaTales - 语言学习故事生成服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Story Context: 故事归档聚合、续写合并
//! - Generation Context: 生成参数、CEFR 等级、请求组装
//! - Settings Context: 用户设置、界面主题
//!
//! 应用层 (application/):
//! - Ports: 端口定义（StoryGenerator, StoryArchive, SettingsStore, KeyValueStore）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: JSON API
//! - Memory: 归档、设置的内存实现
//! - Persistence: Sled 键值存储 + JSON 记录
//! - Adapters: Gemini 客户端

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
