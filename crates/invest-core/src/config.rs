//! Configuration for the investment advisor

use crate::catalog::InvestmentCatalog;
use crate::error::{AdvisorError, Result};
use crate::intake::DEFAULT_CURRENCY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Model used for advisor mode when none is configured
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Configuration for the dialogue and advisor mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Currency label assumed when a salary message names none
    pub default_currency: String,

    /// Catalog file replacing the built-in catalog
    pub catalog_path: Option<PathBuf>,

    /// Optional transcript theme file
    pub theme_path: Option<PathBuf>,

    /// Completion model for advisor mode
    pub model: String,

    /// Reply length cap for advisor answers
    pub max_tokens: usize,

    /// Sampling temperature for advisor answers
    pub temperature: f32,

    /// Number of recent transcript messages sent with an advisor question
    pub context_window: usize,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
            catalog_path: None,
            theme_path: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 512,
            temperature: 0.7,
            context_window: 12,
        }
    }
}

impl AdvisorConfig {
    /// Create a new configuration builder
    pub fn builder() -> AdvisorConfigBuilder {
        AdvisorConfigBuilder::default()
    }

    /// Overlay values from `INVEST_*` environment variables
    #[must_use]
    pub fn with_env(mut self) -> Self {
        if let Ok(currency) = std::env::var("INVEST_DEFAULT_CURRENCY") {
            self.default_currency = currency;
        }
        if let Ok(path) = std::env::var("INVEST_CATALOG_PATH") {
            self.catalog_path = Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var("INVEST_THEME_PATH") {
            self.theme_path = Some(PathBuf::from(path));
        }
        if let Ok(model) = std::env::var("INVEST_MODEL") {
            self.model = model;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.default_currency.trim().is_empty() {
            return Err(AdvisorError::ConfigError(
                "default_currency must not be empty".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AdvisorError::ConfigError(format!(
                "temperature must be between 0 and 2, got {}",
                self.temperature
            )));
        }

        if self.max_tokens == 0 {
            return Err(AdvisorError::ConfigError(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.context_window == 0 {
            return Err(AdvisorError::ConfigError(
                "context_window must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// The configured catalog, or the built-in one when no path is set
    pub fn load_catalog(&self) -> Result<InvestmentCatalog> {
        match &self.catalog_path {
            Some(path) => InvestmentCatalog::from_file(path),
            None => Ok(InvestmentCatalog::builtin()),
        }
    }
}

/// Builder for AdvisorConfig
#[derive(Debug, Default)]
pub struct AdvisorConfigBuilder {
    default_currency: Option<String>,
    catalog_path: Option<PathBuf>,
    theme_path: Option<PathBuf>,
    model: Option<String>,
    max_tokens: Option<usize>,
    temperature: Option<f32>,
    context_window: Option<usize>,
    use_env: bool,
}

impl AdvisorConfigBuilder {
    /// Set the default currency label
    pub fn default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = Some(currency.into());
        self
    }

    /// Set the catalog file
    pub fn catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// Set the theme file
    pub fn theme_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.theme_path = Some(path.into());
        self
    }

    /// Set the advisor model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn context_window(mut self, messages: usize) -> Self {
        self.context_window = Some(messages);
        self
    }

    /// Read `INVEST_*` environment variables before applying explicit values
    pub fn with_env(mut self) -> Self {
        self.use_env = true;
        self
    }

    /// Build and validate the configuration
    ///
    /// Explicitly set values win over the environment, which wins over
    /// defaults.
    pub fn build(self) -> Result<AdvisorConfig> {
        let base = if self.use_env {
            AdvisorConfig::default().with_env()
        } else {
            AdvisorConfig::default()
        };

        let config = AdvisorConfig {
            default_currency: self.default_currency.unwrap_or(base.default_currency),
            catalog_path: self.catalog_path.or(base.catalog_path),
            theme_path: self.theme_path.or(base.theme_path),
            model: self.model.unwrap_or(base.model),
            max_tokens: self.max_tokens.unwrap_or(base.max_tokens),
            temperature: self.temperature.unwrap_or(base.temperature),
            context_window: self.context_window.unwrap_or(base.context_window),
        };

        config.validate()?;
        Ok(config)
    }
}
