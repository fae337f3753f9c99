//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// LLM 生成服务配置
    #[serde(default)]
    pub llm: LlmConfig,

    /// 持久化配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// LLM 生成服务配置
#[derive(Clone, Deserialize)]
pub struct LlmConfig {
    /// API 基础 URL
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// 故事生成使用的模型
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// 关键词、短语释义使用的轻量模型
    #[serde(default = "default_llm_aux_model")]
    pub aux_model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,

    /// 最大重试次数
    #[serde(default = "default_llm_max_retries")]
    pub max_retries: u32,

    /// 后备 API key，用户设置中没有凭据时使用
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_llm_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_llm_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_llm_aux_model() -> String {
    "gemini-2.5-flash-lite".to_string()
}

fn default_llm_timeout() -> u64 {
    120
}

fn default_llm_max_retries() -> u32 {
    1
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            aux_model: default_llm_aux_model(),
            timeout_secs: default_llm_timeout(),
            max_retries: default_llm_max_retries(),
            api_key: None,
        }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("aux_model", &self.aux_model)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// 持久化配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// sled 数据库目录
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// 关闭后只在内存中保存（进程退出即丢失）
    #[serde(default = "default_storage_enabled")]
    pub enabled: bool,
}

fn default_db_path() -> String {
    "data/linguatales.sled".to_string()
}

fn default_storage_enabled() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            enabled: default_storage_enabled(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LogConfig {
    /// 默认的 EnvFilter 指令（RUST_LOG 未设置时使用）
    pub fn filter_directive(&self) -> String {
        format!("{},linguatales={},tower_http=debug", self.level, self.level)
    }
}
