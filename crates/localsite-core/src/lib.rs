pub mod app_config;
pub mod business;
pub mod config;

pub use app_config::{AppConfig, Environment};
pub use business::{
    load_business_config, parse_business_config, AddressConfig, BusinessConfig, BusinessInfo,
    LocationPagesConfig, SelectionMode, ServiceConfig, DEFAULT_URL_PREFIX,
};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read business config at {path}: {source}")]
    BusinessFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse business config: {0}")]
    BusinessFileParse(#[from] serde_yaml::Error),

    #[error("business config validation failed: {0}")]
    Validation(String),
}
