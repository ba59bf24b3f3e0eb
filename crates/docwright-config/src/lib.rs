pub mod config;
pub mod error;
pub mod markdown;
pub mod search;
pub mod sidebar;
pub mod theme;

pub use config::{ApiConfig, ComponentsConfig, Config};
pub use error::ConfigError;
