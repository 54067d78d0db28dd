//! Configuration file management and endpoint resolution.

mod manager;

pub use manager::{
    ClientConfig, ConfigFile, ConfigManager, ENDPOINT_ENV, ResolveOptions, ResolvedConfig,
    normalize_chat_path, resolve_config, resolve_config_from, validate_endpoint,
};
