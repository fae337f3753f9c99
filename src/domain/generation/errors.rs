//! Generation Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationParamsError {
    #[error("请选择源语言")]
    MissingSourceLanguage,

    #[error("请选择目标语言")]
    MissingTargetLanguage,

    #[error("无效的 CEFR 等级: {0:?}")]
    InvalidLevel(String),

    #[error("请选择体裁")]
    MissingGenre,

    #[error("提示词至少需要 {0} 个字符")]
    PromptTooShort(usize),
}
