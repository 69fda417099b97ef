pub mod console_config;
pub mod env;

pub use console_config::{ConsoleConfig, DEFAULT_BASE_URL};
pub use env::EnvConfig;
