//! Process-level configuration

use serde::{Deserialize, Serialize};

/// Default log filter when neither `RUST_LOG` nor an override is given
const DEFAULT_LOG_FILTER: &str = "warn,invest_core=info";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (development, production, ...)
    pub environment: String,
    /// Fallback tracing filter
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "invest-bot".to_string(),
            environment: "development".to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Read `INVEST_ENV` and `INVEST_LOG` on top of the defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            environment: std::env::var("INVEST_ENV").unwrap_or(defaults.environment),
            log_filter: std::env::var("INVEST_LOG").unwrap_or(defaults.log_filter),
            ..defaults
        }
    }

    /// Whether the process runs in production mode
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}
