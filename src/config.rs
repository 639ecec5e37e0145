//! Service configuration loaded from environment variables.

use crate::error::ConfigError;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::Invalid {
                var: "APP_ENV",
                reason: format!("{} (expected development or production)", other),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    /// Directory image uploads are written to and served from under /uploads.
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub db_max_connections: u32,
    pub environment: Environment,
}

impl AppConfig {
    /// Load from process environment.
    ///
    /// | Env Var              | Default                               |
    /// |----------------------|---------------------------------------|
    /// | `DATABASE_URL`       | `postgres://localhost/fantasy_wiki`   |
    /// | `HOST`               | `0.0.0.0`                             |
    /// | `PORT`               | `5000`                                |
    /// | `CORS_ORIGINS`       | `http://localhost:5173`               |
    /// | `UPLOAD_DIR`         | `uploads`                             |
    /// | `MAX_UPLOAD_BYTES`   | `5242880`                             |
    /// | `DB_MAX_CONNECTIONS` | `5`                                   |
    /// | `APP_ENV`            | `development`                         |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let cors_origins = get("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(AppConfig {
            database_url: get("DATABASE_URL", "postgres://localhost/fantasy_wiki"),
            host: get("HOST", "0.0.0.0"),
            port: parse_var("PORT", &get("PORT", "5000"))?,
            cors_origins,
            upload_dir: PathBuf::from(get("UPLOAD_DIR", "uploads")),
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", &get("MAX_UPLOAD_BYTES", "5242880"))?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", &get("DB_MAX_CONNECTIONS", "5"))?,
            environment: get("APP_ENV", "development").parse()?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn parse_var<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: format!("{:?}: {}", raw, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173".to_string()]);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert!(!config.is_production());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("PORT", "8080"),
            ("CORS_ORIGINS", "https://wiki.example, http://localhost:3000,"),
            ("APP_ENV", "Production"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins.len(), 2);
        assert!(config.is_production());
    }

    #[test]
    fn invalid_values_are_config_errors() {
        assert!(matches!(load(&[("PORT", "eighty")]), Err(ConfigError::Invalid { var: "PORT", .. })));
        assert!(matches!(load(&[("APP_ENV", "staging")]), Err(ConfigError::Invalid { var: "APP_ENV", .. })));
    }
}
