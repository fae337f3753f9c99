//! In-Memory Settings Store Implementation

use parking_lot::RwLock;
use std::sync::Arc;

use crate::application::ports::SettingsStorePort;
use crate::domain::settings::{Theme, UserSettings};
use crate::infrastructure::persistence::{keys, JsonPersistence};

/// 内存设置存储
///
/// 设置和主题各占一条持久化记录
pub struct InMemorySettingsStore {
    settings: RwLock<UserSettings>,
    theme: RwLock<Theme>,
    persistence: JsonPersistence,
}

impl InMemorySettingsStore {
    pub fn new(persistence: JsonPersistence) -> Self {
        let settings = persistence.read(keys::USER_SETTINGS, UserSettings::default());
        let theme = persistence.read(keys::THEME, Theme::default());

        tracing::info!(
            source_language = %settings.source_language,
            target_language = %settings.target_language,
            level = %settings.level,
            theme = theme.as_str(),
            "Settings loaded"
        );

        Self {
            settings: RwLock::new(settings),
            theme: RwLock::new(theme),
            persistence,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl SettingsStorePort for InMemorySettingsStore {
    fn get(&self) -> UserSettings {
        self.settings.read().clone()
    }

    fn set(&self, settings: UserSettings) {
        let mut current = self.settings.write();
        *current = settings;
        self.persistence.write(keys::USER_SETTINGS, &*current);

        tracing::info!(
            source_language = %current.source_language,
            target_language = %current.target_language,
            level = %current.level,
            credential_set = current.has_credential(),
            "Settings saved"
        );
    }

    fn theme(&self) -> Theme {
        *self.theme.read()
    }

    fn set_theme(&self, theme: Theme) {
        let mut current = self.theme.write();
        *current = theme;
        self.persistence.write(keys::THEME, &theme);

        tracing::debug!(theme = theme.as_str(), "Theme saved");
    }
}
