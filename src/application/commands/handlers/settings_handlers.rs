//! Settings Command Handlers

use std::sync::Arc;

use crate::application::commands::{SaveSettings, SetTheme};
use crate::application::error::ApplicationError;
use crate::application::ports::SettingsStorePort;
use crate::domain::settings::{Theme, UserSettings};

/// SaveSettings Handler
///
/// 存储层不做校验，这里同样按原样保存（表单校验在生成时进行）
pub struct SaveSettingsHandler {
    settings: Arc<dyn SettingsStorePort>,
}

impl SaveSettingsHandler {
    pub fn new(settings: Arc<dyn SettingsStorePort>) -> Self {
        Self { settings }
    }

    pub async fn handle(&self, command: SaveSettings) -> Result<UserSettings, ApplicationError> {
        self.settings.set(command.settings);
        Ok(self.settings.get())
    }
}

/// SetTheme Handler
pub struct SetThemeHandler {
    settings: Arc<dyn SettingsStorePort>,
}

impl SetThemeHandler {
    pub fn new(settings: Arc<dyn SettingsStorePort>) -> Self {
        Self { settings }
    }

    pub async fn handle(&self, command: SetTheme) -> Result<Theme, ApplicationError> {
        self.settings.set_theme(command.theme);
        Ok(command.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemorySettingsStore;
    use crate::infrastructure::persistence::JsonPersistence;

    #[tokio::test]
    async fn test_save_settings_overwrites_wholesale() {
        let store = InMemorySettingsStore::new(JsonPersistence::unavailable()).arc();
        let handler = SaveSettingsHandler::new(store.clone());

        let first = UserSettings {
            source_language: "English".to_string(),
            target_language: "French".to_string(),
            level: "B1".to_string(),
            credential: "k1".to_string(),
        };
        handler.handle(SaveSettings { settings: first }).await.unwrap();

        // 未校验的值也会被保存
        let second = UserSettings {
            source_language: String::new(),
            target_language: "German".to_string(),
            level: "Z9".to_string(),
            credential: String::new(),
        };
        let saved = handler.handle(SaveSettings { settings: second.clone() }).await.unwrap();

        assert_eq!(saved, second);
        assert_eq!(store.get(), second);
    }

    #[tokio::test]
    async fn test_set_theme() {
        let store = InMemorySettingsStore::new(JsonPersistence::unavailable()).arc();

        let theme = SetThemeHandler::new(store.clone())
            .handle(SetTheme { theme: Theme::Light })
            .await
            .unwrap();

        assert_eq!(theme, Theme::Light);
        assert_eq!(store.theme(), Theme::Light);
    }
}
