//! Application State
//!
//! 包含所有 Command/Query Handlers 以及生成动作的忙碌标记

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::application::{
    // Command handlers
    ClearArchiveHandler, ContinueStoryHandler, GenerateStoryHandler, SaveSettingsHandler,
    SetThemeHandler,
    // Query handlers
    AssistHandler, GetSettingsHandler, GetStoryHandler, GetThemeHandler, ListStoriesHandler,
    // Ports
    SettingsStorePort, StoryArchivePort, StoryGeneratorPort,
};
use crate::domain::generation::Credential;

/// 需要互斥执行的生成动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyAction {
    Generate,
    Continue,
}

impl BusyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusyAction::Generate => "generate",
            BusyAction::Continue => "continue",
        }
    }
}

/// 每种动作一个忙碌标记，同一动作同时只能有一个请求在执行
#[derive(Debug, Default)]
pub struct BusyFlags {
    generate: AtomicBool,
    continue_story: AtomicBool,
}

impl BusyFlags {
    fn flag(&self, action: BusyAction) -> &AtomicBool {
        match action {
            BusyAction::Generate => &self.generate,
            BusyAction::Continue => &self.continue_story,
        }
    }

    /// 尝试占用，动作正在执行时返回 None
    pub fn try_acquire(&self, action: BusyAction) -> Option<BusyGuard<'_>> {
        self.flag(action)
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard { flags: self, action })
    }

    pub fn is_busy(&self, action: BusyAction) -> bool {
        self.flag(action).load(Ordering::Acquire)
    }
}

/// 离开作用域时释放忙碌标记（包括出错和请求被取消）
pub struct BusyGuard<'a> {
    flags: &'a BusyFlags,
    action: BusyAction,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flags.flag(self.action).store(false, Ordering::Release);
    }
}

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub archive: Arc<dyn StoryArchivePort>,
    pub settings: Arc<dyn SettingsStorePort>,
    pub generator: Arc<dyn StoryGeneratorPort>,

    pub busy: BusyFlags,

    // ========== Command Handlers ==========
    pub generate_story_handler: GenerateStoryHandler,
    pub continue_story_handler: ContinueStoryHandler,
    pub clear_archive_handler: ClearArchiveHandler,
    pub save_settings_handler: SaveSettingsHandler,
    pub set_theme_handler: SetThemeHandler,

    // ========== Query Handlers ==========
    pub list_stories_handler: ListStoriesHandler,
    pub get_story_handler: GetStoryHandler,
    pub get_settings_handler: GetSettingsHandler,
    pub get_theme_handler: GetThemeHandler,
    pub assist_handler: AssistHandler,
}

impl AppState {
    /// 创建应用状态
    ///
    /// `fallback_credential` 为配置中的 API key，设置中没有凭据时使用
    pub fn new(
        archive: Arc<dyn StoryArchivePort>,
        settings: Arc<dyn SettingsStorePort>,
        generator: Arc<dyn StoryGeneratorPort>,
        fallback_credential: Option<Credential>,
    ) -> Self {
        Self {
            // Ports
            archive: archive.clone(),
            settings: settings.clone(),
            generator: generator.clone(),

            busy: BusyFlags::default(),

            // Command handlers
            generate_story_handler: GenerateStoryHandler::new(
                archive.clone(),
                settings.clone(),
                generator.clone(),
                fallback_credential.clone(),
            ),
            continue_story_handler: ContinueStoryHandler::new(
                archive.clone(),
                settings.clone(),
                generator.clone(),
                fallback_credential.clone(),
            ),
            clear_archive_handler: ClearArchiveHandler::new(archive.clone()),
            save_settings_handler: SaveSettingsHandler::new(settings.clone()),
            set_theme_handler: SetThemeHandler::new(settings.clone()),

            // Query handlers
            list_stories_handler: ListStoriesHandler::new(archive.clone()),
            get_story_handler: GetStoryHandler::new(archive.clone()),
            get_settings_handler: GetSettingsHandler::new(settings.clone()),
            get_theme_handler: GetThemeHandler::new(settings.clone()),
            assist_handler: AssistHandler::new(settings.clone(), generator.clone(), fallback_credential),
        }
    }
}
