// blog-service/src/config.rs

use std::{env, str::FromStr};

use shared::{DatabaseConfig, LogConfig, LogFormat, LogLevel};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub upload: UploadConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    /// Custom S3 endpoint; `None` means the provider's default
    pub endpoint: Option<String>,
    /// Base of the public object URLs; falls back to the endpoint
    pub public_url: Option<String>,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub path_style: bool,
}

impl StorageConfig {
    pub fn public_base_url(&self) -> String {
        self.public_url
            .clone()
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| format!("https://s3.{}.amazonaws.com", self.region))
    }
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_file_size_mb: usize,
}

impl UploadConfig {
    /// Multipart framing and the text fields ride on top of the file itself
    const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

    pub fn max_file_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_file_bytes() + Self::FORM_OVERHEAD_BYTES
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            level: self.level,
            format: self.format,
            include_line_numbers: matches!(self.format, LogFormat::Pretty),
            include_thread_ids: matches!(self.format, LogFormat::Json),
            ..LogConfig::default()
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var("SERVER_PORT", env::var("SERVER_PORT").ok(), defaults.server.port)?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(defaults.database.url),
                max_connections: parse_var(
                    "DATABASE_MAX_CONNECTIONS",
                    env::var("DATABASE_MAX_CONNECTIONS").ok(),
                    defaults.database.max_connections,
                )?,
                min_connections: parse_var(
                    "DATABASE_MIN_CONNECTIONS",
                    env::var("DATABASE_MIN_CONNECTIONS").ok(),
                    defaults.database.min_connections,
                )?,
                connection_timeout: parse_var(
                    "DATABASE_CONNECTION_TIMEOUT",
                    env::var("DATABASE_CONNECTION_TIMEOUT").ok(),
                    defaults.database.connection_timeout,
                )?,
                idle_timeout: parse_var(
                    "DATABASE_IDLE_TIMEOUT",
                    env::var("DATABASE_IDLE_TIMEOUT").ok(),
                    defaults.database.idle_timeout,
                )?,
            },
            storage: StorageConfig {
                bucket: env::var("STORAGE_BUCKET").unwrap_or(defaults.storage.bucket),
                region: env::var("STORAGE_REGION").unwrap_or(defaults.storage.region),
                endpoint: env::var("STORAGE_ENDPOINT").ok().or(defaults.storage.endpoint),
                public_url: env::var("STORAGE_PUBLIC_URL").ok(),
                access_key_id: required_var("STORAGE_ACCESS_KEY_ID")?,
                secret_access_key: required_var("STORAGE_SECRET_ACCESS_KEY")?,
                path_style: parse_var(
                    "STORAGE_PATH_STYLE",
                    env::var("STORAGE_PATH_STYLE").ok(),
                    defaults.storage.path_style,
                )?,
            },
            upload: UploadConfig {
                max_file_size_mb: parse_var(
                    "MAX_UPLOAD_SIZE_MB",
                    env::var("MAX_UPLOAD_SIZE_MB").ok(),
                    defaults.upload.max_file_size_mb,
                )?,
            },
            logging: LoggingConfig {
                level: parse_var("LOG_LEVEL", env::var("LOG_LEVEL").ok(), defaults.logging.level)?,
                format: parse_var("LOG_FORMAT", env::var("LOG_FORMAT").ok(), defaults.logging.format)?,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidConfig("Max connections must be > 0".to_string()));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::InvalidConfig(
                "Min connections must not exceed max connections".to_string(),
            ));
        }

        if self.storage.bucket.trim().is_empty() {
            return Err(ConfigError::InvalidConfig("Storage bucket must be set".to_string()));
        }

        if self.upload.max_file_size_mb == 0 {
            return Err(ConfigError::InvalidConfig("Max upload size must be > 0".to_string()));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            database: DatabaseConfig::default(),
            storage: StorageConfig {
                bucket: "blog-covers".to_string(),
                region: "us-east-1".to_string(),
                endpoint: Some("http://localhost:9000".to_string()), // MinIO default
                public_url: None,
                access_key_id: "minioadmin".to_string(),
                secret_access_key: "minioadmin".to_string(),
                path_style: true,
            },
            upload: UploadConfig {
                max_file_size_mb: 10,
            },
            logging: LoggingConfig {
                level: LogLevel::Info,
                format: LogFormat::Pretty,
            },
        }
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn parse_var<T: FromStr>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
