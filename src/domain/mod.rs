//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Story Context: 故事归档、续写合并
//! - Generation Context: 生成请求参数与组装
//! - Settings Context: 用户偏好与主题

pub mod generation;
pub mod settings;
pub mod story;

pub use generation::{CefrLevel, Credential, NewStoryForm, StoryGenerationParams};
pub use settings::{Theme, UserSettings};
pub use story::{ArchivedStory, GeneratedStory, GlossaryItem, StoryId, StoryParams, StoryPart};
