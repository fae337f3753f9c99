//! Settings Commands

use crate::domain::settings::{Theme, UserSettings};

/// 保存设置命令（整体覆盖）
#[derive(Debug, Clone)]
pub struct SaveSettings {
    pub settings: UserSettings,
}

/// 设置主题命令
#[derive(Debug, Clone, Copy)]
pub struct SetTheme {
    pub theme: Theme,
}
