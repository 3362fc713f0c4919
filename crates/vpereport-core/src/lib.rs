use thiserror::Error;

pub mod app_config;
pub mod channel;
pub mod config;
pub mod normalize;
pub mod rank;
pub mod report;

pub use app_config::{AppConfig, Environment};
pub use channel::Channel;
pub use config::{load_app_config, load_app_config_from_env};
pub use normalize::clean_value;
pub use rank::{top_articles, Article};
pub use report::{channel_articles, channel_totals, unwrap_envelope};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
