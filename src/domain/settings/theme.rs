//! Settings Context - Theme

use serde::{Deserialize, Serialize};

/// 界面主题偏好
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(serde_json::from_str::<Theme>("\"light\"").unwrap(), Theme::Light);
        assert_eq!(Theme::default(), Theme::System);
    }

    #[test]
    fn test_unknown_theme_rejected() {
        assert_eq!(Theme::System.as_str(), "system");
        assert!(serde_json::from_str::<Theme>("\"blue\"").is_err());
    }
}
