//! Generation Context - 生成请求上下文
//!
//! 职责:
//! - 生成请求参数与凭据
//! - 新故事 / 续写请求组装

mod assembler;
mod errors;
mod params;

pub use assembler::{for_continuation, for_new_story};
pub use errors::GenerationParamsError;
pub use params::{CefrLevel, Credential, NewStoryForm, StoryGenerationParams, MIN_PROMPT_CHARS};
