//! Dashboard configuration loaded from `.modelboard/config.toml`.

mod defaults;
mod load;
mod types;

pub use load::{CONFIG_FILE_NAME, config_path, load_from_path, load_or_default};
pub use types::{AppConfig, ConfigError, GatewaySettings, HistorySettings};
