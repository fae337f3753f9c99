//! Settings Store Port - 用户偏好管理
//!
//! 定义设置存储的抽象接口，具体实现在 infrastructure/memory 层

use crate::domain::settings::{Theme, UserSettings};

/// Settings Store Port
///
/// 设置为单例记录，保存时整体覆盖并立即持久化；本层不做校验
pub trait SettingsStorePort: Send + Sync {
    /// 获取当前设置，首次使用时返回默认值
    fn get(&self) -> UserSettings;

    /// 整体覆盖设置
    fn set(&self, settings: UserSettings);

    /// 获取界面主题
    fn theme(&self) -> Theme;

    /// 设置界面主题
    fn set_theme(&self, theme: Theme);
}
