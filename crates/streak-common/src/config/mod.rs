//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, AttendanceConfig, ConfigError, CooldownConfig, DatabaseConfig,
    Environment, FineConfig, JudgeConfig, ServerConfig,
};
