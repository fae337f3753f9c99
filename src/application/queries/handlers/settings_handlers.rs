//! Settings Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::SettingsStorePort;
use crate::application::queries::{GetSettings, GetTheme};
use crate::domain::settings::{Theme, UserSettings};

/// GetSettings Handler
pub struct GetSettingsHandler {
    settings: Arc<dyn SettingsStorePort>,
}

impl GetSettingsHandler {
    pub fn new(settings: Arc<dyn SettingsStorePort>) -> Self {
        Self { settings }
    }

    pub async fn handle(&self, _query: GetSettings) -> Result<UserSettings, ApplicationError> {
        Ok(self.settings.get())
    }
}

/// GetTheme Handler
pub struct GetThemeHandler {
    settings: Arc<dyn SettingsStorePort>,
}

impl GetThemeHandler {
    pub fn new(settings: Arc<dyn SettingsStorePort>) -> Self {
        Self { settings }
    }

    pub async fn handle(&self, _query: GetTheme) -> Result<Theme, ApplicationError> {
        Ok(self.settings.theme())
    }
}
