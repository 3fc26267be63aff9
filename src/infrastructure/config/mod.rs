//! Configuration adapters

mod toml_store;

pub use toml_store::{TomlConfigStore, LOCAL_CONFIG_FILE};
