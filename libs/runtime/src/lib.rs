//! Runtime support shared by Ethica hosts: layered configuration and logging.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{
    default_logging_config, AppConfig, AppConfigProvider, CliArgs, ClientConfig, LoggingConfig,
    Section,
};
