//! Optional transcript theme loaded at startup

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Line prefixes used when rendering the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub user_prefix: String,
    pub bot_prefix: String,
    pub error_prefix: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            user_prefix: "🧑 أنت:".to_string(),
            bot_prefix: "🤖 المساعد:".to_string(),
            error_prefix: "❌".to_string(),
        }
    }
}

impl Theme {
    /// Load a theme file if there is one.
    ///
    /// A missing file is skipped quietly; a file that exists but does not
    /// parse falls back to the default with a warning.
    pub fn load_optional(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("No theme loaded from {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(theme) => {
                debug!("Loaded theme from {}", path.display());
                theme
            }
            Err(e) => {
                warn!("Ignoring malformed theme file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_theme_uses_default() {
        let theme = Theme::load_optional(Some(Path::new("/no/such/theme.json")));
        assert_eq!(theme, Theme::default());
        assert_eq!(Theme::load_optional(None), Theme::default());
    }

    #[test]
    fn test_partial_theme_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"bot_prefix": "[bot]"}}"#).unwrap();

        let theme = Theme::load_optional(Some(file.path()));
        assert_eq!(theme.bot_prefix, "[bot]");
        assert_eq!(theme.user_prefix, Theme::default().user_prefix);
    }

    #[test]
    fn test_malformed_theme_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert_eq!(Theme::load_optional(Some(file.path())), Theme::default());
    }
}
