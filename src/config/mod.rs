//! # Configuration Management Module
//!
//! Type-safe TOML configuration for the helpdesk binary and for anyone embedding the
//! responder with a customised reply policy.
//!
//! ## Configuration Structure
//!
//! - [`DeskConfig`] - desk name and the optional user seed file
//! - [`ResponsesConfig`] - not-found text, fallback text, and the ordered keyword rules
//! - [`LoggingConfig`] - log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use helpdesk::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let mut desk = config.build_responder()?;
//!     println!("{}", desk.process_query("What are your hours of operation?", "123"));
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [desk]
//! name = "Helpdesk"
//! users_file = "data/users.json"
//!
//! [responses]
//! user_not_found = "User not found. Please provide a valid user ID."
//! fallback = "I'm sorry, I didn't understand your question."
//!
//! [[responses.rules]]
//! name = "password_reset"
//! keyword = "reset my password"
//! template = "Hello {user_name}, to reset your password, click on 'Forgot Password'."
//!
//! [logging]
//! level = "info"
//! file = "helpdesk.log"
//! ```
//!
//! Rules are evaluated in file order. Omitting `[responses]` or `[logging]` falls back
//! to the built-in defaults; omitting `users_file` uses the built-in user table.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::fs;

use crate::desk::rules::{DEFAULT_RULES, FALLBACK, USER_NOT_FOUND};
use crate::desk::{DeskError, QueryResponder, ResponsePolicy, ResponseRule, StaticDirectory, Template};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub desk: DeskConfig,
    #[serde(default)]
    pub responses: ResponsesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskConfig {
    pub name: String,
    /// JSON user seed file. When unset the built-in two-user table is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub name: String,
    pub keyword: String,
    pub template: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsesConfig {
    #[serde(default = "default_user_not_found")]
    pub user_not_found: String,
    #[serde(default = "default_fallback")]
    pub fallback: String,
    #[serde(default = "default_rules")]
    pub rules: Vec<RuleConfig>,
}

fn default_user_not_found() -> String {
    USER_NOT_FOUND.to_string()
}

fn default_fallback() -> String {
    FALLBACK.to_string()
}

fn default_rules() -> Vec<RuleConfig> {
    DEFAULT_RULES
        .iter()
        .map(|(name, keyword, template)| RuleConfig {
            name: name.to_string(),
            keyword: keyword.to_string(),
            template: template.to_string(),
        })
        .collect()
}

impl Default for ResponsesConfig {
    fn default() -> Self {
        Self {
            user_not_found: default_user_not_found(),
            fallback: default_fallback(),
            rules: default_rules(),
        }
    }
}

impl ResponsesConfig {
    /// Parse templates and validate rules into a ready-to-use policy.
    pub fn to_policy(&self) -> Result<ResponsePolicy, DeskError> {
        let rules = self
            .rules
            .iter()
            .map(|r| ResponseRule::new(&r.name, &r.keyword, &r.template))
            .collect::<Result<Vec<_>, _>>()?;
        ResponsePolicy::new(rules, Template::parse(&self.fallback)?, &self.user_not_found)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parsed `level`; unknown values fall back to `Info`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        Self::from_toml_str(&content).map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, DeskError> {
        let config: Config =
            toml::from_str(content).map_err(|e| DeskError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Check everything that can be checked without touching the filesystem.
    pub fn validate(&self) -> Result<(), DeskError> {
        if self.desk.name.trim().is_empty() {
            return Err(DeskError::Config("desk.name must not be empty".into()));
        }
        self.responses.to_policy()?;
        Ok(())
    }

    /// User directory named by `desk.users_file`, or the built-in table.
    pub fn load_directory(&self) -> Result<StaticDirectory, DeskError> {
        match &self.desk.users_file {
            Some(path) => StaticDirectory::from_json_file(path),
            None => Ok(StaticDirectory::builtin()),
        }
    }

    /// Fresh responder wired to the configured directory and policy.
    pub fn build_responder(&self) -> Result<QueryResponder, DeskError> {
        let directory = self.load_directory()?;
        let policy = self.responses.to_policy()?;
        Ok(QueryResponder::with_policy(Arc::new(directory), policy))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            desk: DeskConfig {
                name: "Helpdesk".to_string(),
                users_file: None,
            },
            responses: ResponsesConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                file: Some("helpdesk.log".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::from_toml_str(&text).unwrap();
        assert_eq!(parsed.desk.name, "Helpdesk");
        assert_eq!(parsed.responses.rules, default_rules());
        assert_eq!(parsed.logging.file.as_deref(), Some("helpdesk.log"));
    }

    #[test]
    fn default_responses_build_the_default_policy() {
        let from_config = ResponsesConfig::default().to_policy().unwrap();
        assert_eq!(from_config, ResponsePolicy::default());
    }

    #[test]
    fn missing_sections_take_defaults() {
        let config = Config::from_toml_str("[desk]\nname = \"Desk\"\n").unwrap();
        assert_eq!(config.responses.user_not_found, USER_NOT_FOUND);
        assert_eq!(config.responses.rules.len(), 3);
        assert_eq!(config.logging.level_filter(), log::LevelFilter::Info);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn bad_template_fails_validation() {
        let toml = r#"
            [desk]
            name = "Desk"

            [[responses.rules]]
            name = "broken"
            keyword = "help"
            template = "Hi {nickname}"
        "#;
        let err = Config::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, DeskError::Template { .. }));
    }

    #[test]
    fn empty_desk_name_is_rejected() {
        let err = Config::from_toml_str("[desk]\nname = \"  \"\n").unwrap_err();
        assert!(matches!(err, DeskError::Config(_)));
    }

    #[test]
    fn level_filter_parses_known_levels() {
        let logging = LoggingConfig {
            level: "debug".into(),
            file: None,
        };
        assert_eq!(logging.level_filter(), log::LevelFilter::Debug);
        let logging = LoggingConfig {
            level: "chatty".into(),
            file: None,
        };
        assert_eq!(logging.level_filter(), log::LevelFilter::Info);
    }
}
