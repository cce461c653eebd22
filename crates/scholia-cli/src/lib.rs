pub mod config;
pub mod logging;
pub mod progress;

pub use config::AppConfig;
