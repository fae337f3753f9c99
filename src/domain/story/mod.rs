//! Story Context - 故事限界上下文
//!
//! 职责:
//! - 归档故事聚合
//! - 故事片段与词汇表实体
//! - 续写合并规则

mod aggregate;
mod entities;
mod merge;
mod value_objects;

pub use aggregate::{ArchivedStory, StoryParams};
pub use entities::{GeneratedStory, GlossaryItem, StoryPart};
pub use merge::{merge_continuation, merge_glossary};
pub use value_objects::StoryId;
