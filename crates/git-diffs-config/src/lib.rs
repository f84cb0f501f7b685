//! Configuration and file paths for git-diffs
//!
//! This crate provides:
//! - Config file discovery (working directory, home, platform config dir)
//! - Application configuration (AppConfig) with engine defaults

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::AppConfig;
pub use config_file::load_config_file;
