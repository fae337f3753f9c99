//! HTTP Handlers

mod assist;
mod ping;
mod settings;
mod story;

pub use assist::*;
pub use ping::*;
pub use settings::*;
pub use story::*;
