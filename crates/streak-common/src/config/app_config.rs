//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

use streak_core::{AttendanceCalendar, FinePolicy};

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub judge: JudgeConfig,
    pub attendance: AttendanceConfig,
    pub fine: FineConfig,
    pub cooldown: CooldownConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
///
/// A `memory://` URL selects the in-process store instead of PostgreSQL.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.url.starts_with("memory://")
    }
}

/// Judge service (solved.ac) client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JudgeConfig {
    #[serde(default = "default_judge_base_url")]
    pub base_url: String,
    #[serde(default = "default_judge_timeout")]
    pub timeout_secs: u64,
}

/// Attendance window and sync settings
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceConfig {
    /// Community-wide local time, as whole hours east of UTC
    #[serde(default = "default_utc_offset")]
    pub utc_offset_hours: i32,
    /// How far initial-sync records are backdated
    #[serde(default = "default_backfill_days")]
    pub backfill_days: i64,
}

impl AttendanceConfig {
    /// Build the calendar for the configured offset
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if the offset is out of range
    pub fn calendar(&self) -> Result<AttendanceCalendar, ConfigError> {
        AttendanceCalendar::with_offset_hours(self.utc_offset_hours).map_err(|e| {
            ConfigError::InvalidValue("ATTENDANCE_UTC_OFFSET_HOURS", e.to_string())
        })
    }

    #[must_use]
    pub fn backfill(&self) -> chrono::Duration {
        chrono::Duration::days(self.backfill_days)
    }
}

/// Weekly fine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FineConfig {
    #[serde(default)]
    pub policy: FinePolicy,
}

/// Cooldown intervals for expensive operations
#[derive(Debug, Clone, Deserialize)]
pub struct CooldownConfig {
    /// Global forced refresh
    #[serde(default = "default_refresh_cooldown")]
    pub refresh_secs: u64,
    /// Per-requester streak check
    #[serde(default = "default_streak_cooldown")]
    pub streak_secs: u64,
}

impl CooldownConfig {
    #[must_use]
    pub fn refresh_interval(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::try_from(self.refresh_secs).unwrap_or(i64::MAX))
    }

    #[must_use]
    pub fn streak_interval(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::try_from(self.streak_secs).unwrap_or(i64::MAX))
    }
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_cooldown(),
            streak_secs: default_streak_cooldown(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "solve-streak".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_judge_base_url() -> String {
    "https://solved.ac/api/v3".to_string()
}

fn default_judge_timeout() -> u64 {
    10
}

fn default_utc_offset() -> i32 {
    9
}

fn default_backfill_days() -> i64 {
    3
}

fn default_fine_unit() -> u64 {
    100
}

fn default_refresh_cooldown() -> u64 {
    3600 // 1 hour
}

fn default_streak_cooldown() -> u64 {
    300 // 5 minutes
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<T, F>(lookup: &F, name: &'static str, default: impl FnOnce() -> T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        None => Ok(default()),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV").map(|s| s.to_lowercase()) {
            None => Environment::default(),
            Some(s) => match s.as_str() {
                "production" => Environment::Production,
                "staging" => Environment::Staging,
                "development" => Environment::Development,
                _ => return Err(ConfigError::InvalidValue("APP_ENV", s)),
            },
        };

        let fine_unit = parse_or(&lookup, "FINE_UNIT", default_fine_unit)?;
        let policy = match lookup("FINE_POLICY").map(|s| s.to_lowercase()) {
            None => FinePolicy::Pooled(fine_unit),
            Some(s) => match s.as_str() {
                "pooled" => FinePolicy::Pooled(fine_unit),
                "flat" => FinePolicy::Flat(fine_unit),
                _ => return Err(ConfigError::InvalidValue("FINE_POLICY", s)),
            },
        };

        let config = Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: lookup("API_PORT")
                    .ok_or(ConfigError::MissingVar("API_PORT"))?
                    .parse()
                    .map_err(|e: std::num::ParseIntError| {
                        ConfigError::InvalidValue("API_PORT", e.to_string())
                    })?,
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", default_min_connections)?,
            },
            judge: JudgeConfig {
                base_url: lookup("JUDGE_BASE_URL").unwrap_or_else(default_judge_base_url),
                timeout_secs: parse_or(&lookup, "JUDGE_TIMEOUT_SECS", default_judge_timeout)?,
            },
            attendance: AttendanceConfig {
                utc_offset_hours: parse_or(&lookup, "ATTENDANCE_UTC_OFFSET_HOURS", default_utc_offset)?,
                backfill_days: parse_or(&lookup, "SYNC_BACKFILL_DAYS", default_backfill_days)?,
            },
            fine: FineConfig { policy },
            cooldown: CooldownConfig {
                refresh_secs: parse_or(&lookup, "COOLDOWN_REFRESH_SECS", default_refresh_cooldown)?,
                streak_secs: parse_or(&lookup, "COOLDOWN_STREAK_SECS", default_streak_cooldown)?,
            },
        };

        // Reject offsets the calendar cannot represent up front
        config.attendance.calendar()?;
        if config.attendance.backfill_days < 0 {
            return Err(ConfigError::InvalidValue(
                "SYNC_BACKFILL_DAYS",
                config.attendance.backfill_days.to_string(),
            ));
        }

        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
