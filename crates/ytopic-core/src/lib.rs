//! Shared domain types and configuration for ytopic.

mod app_config;
pub mod blocklist;
mod config;
pub mod keyword;
pub mod topics;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use blocklist::{
    blocked_keyword_stats, find_blocked_keyword, BlockCategory, BlockedKeyword, BlocklistStats,
    BLOCKED_KEYWORDS,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use keyword::{check_keyword, KeywordCheck, KeywordRejection};
pub use topics::{seasonal_topics, CompetitionLevel, ContentType, NewCategory, NewTopic};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
