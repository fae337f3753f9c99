//! LLM Adapter - 故事生成服务客户端

mod fake_generator;
mod gemini_client;
pub mod prompts;

pub use fake_generator::{FakeStoryGenerator, FakeStoryGeneratorConfig};
pub use gemini_client::*;
