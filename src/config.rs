//! Application configuration module
//!
//! Handles loading and validating configuration from environment variables.

use chrono_tz::Tz;
use serde::Deserialize;
use std::net::Ipv4Addr;
use std::time::Duration;
use thiserror::Error;

/// Admin recipient used when neither `ADMIN_EMAIL` nor `FROM_EMAIL` is set.
pub const FALLBACK_ADMIN_EMAIL: &str = "sales@sljsolutions.com";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: Ipv4Addr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::new(0, 0, 0, 0), // Bind to 0.0.0.0 for Docker
            port: 3000,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3001".to_string()],
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    #[default]
    Production,
    Staging,
    Development,
}

impl AppEnvironment {
    /// Diagnostic details are only attached to error responses in development.
    pub fn exposes_error_details(&self) -> bool {
        matches!(self, AppEnvironment::Development)
    }
}

impl std::str::FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(AppEnvironment::Production),
            "staging" => Ok(AppEnvironment::Staging),
            "development" | "dev" => Ok(AppEnvironment::Development),
            other => Err(ConfigError::InvalidValue(format!(
                "APP_ENV must be production, staging or development (got '{}')",
                other
            ))),
        }
    }
}

/// How the SMTP connection is secured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    #[default]
    StartTls,
    Tls,
    None,
}

impl std::str::FromStr for SmtpSecurity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "starttls" => Ok(SmtpSecurity::StartTls),
            "tls" => Ok(SmtpSecurity::Tls),
            "none" => Ok(SmtpSecurity::None),
            other => Err(ConfigError::InvalidValue(format!(
                "SMTP_TLS must be starttls, tls or none (got '{}')",
                other
            ))),
        }
    }
}

/// Mail relay configuration
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub security: SmtpSecurity,
    pub from_email: String,
    pub from_name: String,
    pub admin_email: String,
    pub timeout: Duration,
    pub timezone: Tz,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "localhost".to_string(),
            smtp_port: 587,
            smtp_user: None,
            smtp_password: None,
            security: SmtpSecurity::StartTls,
            from_email: FALLBACK_ADMIN_EMAIL.to_string(),
            from_name: "SLJ Solutions".to_string(),
            admin_email: FALLBACK_ADMIN_EMAIL.to_string(),
            timeout: Duration::from_secs(15),
            timezone: chrono_tz::Asia::Kolkata,
        }
    }
}

/// Complete application settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub mail: MailConfig,
    pub environment: AppEnvironment,
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let server_defaults = ServerConfig::default();
        let server = ServerConfig {
            host: match var("HOST") {
                Some(h) => h
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(format!("HOST is not an IPv4 address: {}", h)))?,
                None => server_defaults.host,
            },
            port: match var("PORT") {
                Some(p) => p
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(format!("PORT is not a valid port: {}", p)))?,
                None => server_defaults.port,
            },
        };

        let cors = CorsConfig {
            allowed_origins: var("ALLOWED_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|| CorsConfig::default().allowed_origins),
        };

        let environment = match var("APP_ENV") {
            Some(value) => value.parse()?,
            None => AppEnvironment::default(),
        };

        let mail = Self::load_mail(&var)?;

        Ok(Self {
            server,
            cors,
            mail,
            environment,
        })
    }

    fn load_mail<F>(var: &F) -> Result<MailConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = MailConfig::default();

        let smtp_host = var("SMTP_HOST").ok_or_else(|| ConfigError::MissingVar("SMTP_HOST".to_string()))?;

        let smtp_port = match var("SMTP_PORT") {
            Some(p) => p
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("SMTP_PORT is not a valid port: {}", p)))?,
            None => defaults.smtp_port,
        };

        let security = match var("SMTP_TLS") {
            Some(value) => value.parse()?,
            None => defaults.security,
        };

        let smtp_user = var("SMTP_USER");
        let smtp_password = var("SMTP_PASSWORD");

        let from_email = var("FROM_EMAIL")
            .or_else(|| smtp_user.clone())
            .ok_or_else(|| ConfigError::MissingVar("FROM_EMAIL".to_string()))?;

        let admin_email = var("ADMIN_EMAIL")
            .or_else(|| var("FROM_EMAIL"))
            .unwrap_or_else(|| FALLBACK_ADMIN_EMAIL.to_string());

        let timeout = match var("MAIL_TIMEOUT_SECS") {
            Some(s) => {
                let secs: u64 = s
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(format!("MAIL_TIMEOUT_SECS must be a number: {}", s)))?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue("MAIL_TIMEOUT_SECS must be greater than zero".to_string()));
                }
                Duration::from_secs(secs)
            }
            None => defaults.timeout,
        };

        let timezone = match var("MAIL_TIMEZONE") {
            Some(tz) => tz
                .parse::<Tz>()
                .map_err(|_| ConfigError::InvalidValue(format!("MAIL_TIMEZONE is not an IANA time zone: {}", tz)))?,
            None => defaults.timezone,
        };

        Ok(MailConfig {
            smtp_host,
            smtp_port,
            smtp_user,
            smtp_password,
            security,
            from_email,
            from_name: var("FROM_NAME").unwrap_or(defaults.from_name),
            admin_email,
            timeout,
            timezone,
        })
    }
}
