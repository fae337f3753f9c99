//! Settings Context - User Settings

use serde::{Deserialize, Serialize};

/// 默认源语言
pub const DEFAULT_SOURCE_LANGUAGE: &str = "English";

/// 学习者偏好设置
///
/// 每个安装只有一份，保存时整体覆盖
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub source_language: String,
    pub target_language: String,
    pub level: String,
    /// LLM API 密钥
    #[serde(alias = "apiKey")]
    pub credential: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            source_language: DEFAULT_SOURCE_LANGUAGE.to_string(),
            target_language: String::new(),
            level: String::new(),
            credential: String::new(),
        }
    }
}

impl UserSettings {
    pub fn has_credential(&self) -> bool {
        !self.credential.trim().is_empty()
    }
}

impl std::fmt::Debug for UserSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSettings")
            .field("source_language", &self.source_language)
            .field("target_language", &self.target_language)
            .field("level", &self.level)
            .field("credential", &if self.has_credential() { "<redacted>" } else { "" })
            .finish()
    }
}
