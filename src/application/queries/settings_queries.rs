//! Settings Queries

/// 获取用户设置
#[derive(Debug, Clone, Default)]
pub struct GetSettings;

/// 获取界面主题
#[derive(Debug, Clone, Default)]
pub struct GetTheme;
