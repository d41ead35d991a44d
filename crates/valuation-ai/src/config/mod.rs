use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::performance::{
    CategoryTable, CategoryTableError, PolicyError, ScoringPolicy,
};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            scoring: ScoringConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

/// Scoring policy overrides and the optional custom category table.
#[derive(Debug, Clone, Default)]
pub struct ScoringConfig {
    pub policy: ScoringPolicy,
    pub categories_path: Option<PathBuf>,
}

impl ScoringConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = ScoringPolicy::default();
        let policy = ScoringPolicy {
            reference_salary: env_f64("SCORING_REFERENCE_SALARY", defaults.reference_salary)?,
            salary_cap_multiple: env_f64(
                "SCORING_SALARY_CAP_MULTIPLE",
                defaults.salary_cap_multiple,
            )?,
            reference_experience_years: env_f64(
                "SCORING_REFERENCE_EXPERIENCE_YEARS",
                defaults.reference_experience_years,
            )?,
            max_experience_bonus: env_f64(
                "SCORING_MAX_EXPERIENCE_BONUS",
                defaults.max_experience_bonus,
            )?,
            ..defaults
        };
        policy.validate().map_err(ConfigError::InvalidPolicy)?;

        let categories_path = env::var("SCORING_CATEGORIES_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            policy,
            categories_path,
        })
    }

    /// Loads and validates the category table once at startup.
    pub fn category_table(&self) -> Result<CategoryTable, CategoryTableError> {
        match &self.categories_path {
            Some(path) => CategoryTable::from_path(path),
            None => Ok(CategoryTable::builtin()),
        }
    }
}

fn env_f64(var: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidNumber { var, value: raw }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { var: &'static str, value: String },
    InvalidPolicy(PolicyError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { var, value } => {
                write!(f, "{var} must be a number (found '{value}')")
            }
            ConfigError::InvalidPolicy(err) => write!(f, "invalid scoring policy: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPolicy(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for var in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "SCORING_REFERENCE_SALARY",
            "SCORING_SALARY_CAP_MULTIPLE",
            "SCORING_REFERENCE_EXPERIENCE_YEARS",
            "SCORING_MAX_EXPERIENCE_BONUS",
            "SCORING_CATEGORIES_PATH",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.scoring.policy, ScoringPolicy::default());
        assert!(config.scoring.categories_path.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn scoring_overrides_are_applied() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SCORING_REFERENCE_SALARY", "150000");
        env::set_var("SCORING_MAX_EXPERIENCE_BONUS", "0.25");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.scoring.policy.reference_salary, 150_000.0);
        assert_eq!(config.scoring.policy.max_experience_bonus, 0.25);
        assert_eq!(config.scoring.policy.salary_cap_multiple, 2.0);
        reset_env();
    }

    #[test]
    fn rejects_non_positive_reference_salary() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SCORING_REFERENCE_SALARY", "0");
        let err = AppConfig::load().expect_err("policy rejected");
        assert!(matches!(err, ConfigError::InvalidPolicy(_)));
        reset_env();
    }

    #[test]
    fn rejects_unparseable_numbers() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SCORING_SALARY_CAP_MULTIPLE", "two");
        let err = AppConfig::load().expect_err("number rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                var: "SCORING_SALARY_CAP_MULTIPLE",
                ..
            }
        ));
        reset_env();
    }

    #[test]
    fn missing_category_file_is_a_configuration_error() {
        let config = ScoringConfig {
            categories_path: Some(PathBuf::from("/nonexistent/categories.json")),
            ..ScoringConfig::default()
        };
        assert!(matches!(
            config.category_table(),
            Err(CategoryTableError::Io(_))
        ));
    }
}
