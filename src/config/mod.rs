pub mod reader_config;

pub use reader_config::{load_config, load_config_or_default, AppConfig, ReaderSettings};
