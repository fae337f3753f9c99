//! Settings Context - 用户偏好上下文
//!
//! 职责:
//! - 学习者语言与等级设置
//! - 界面主题偏好

mod theme;
mod user_settings;

pub use theme::Theme;
pub use user_settings::{UserSettings, DEFAULT_SOURCE_LANGUAGE};
