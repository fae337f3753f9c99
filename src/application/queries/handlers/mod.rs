//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod assist_handlers;
mod settings_handlers;
mod story_handlers;

pub use assist_handlers::*;
pub use settings_handlers::*;
pub use story_handlers::*;
