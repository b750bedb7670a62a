use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_CLASSIFIER_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli";
pub const DEFAULT_HYPOTHESIS_TEMPLATE: &str = "This example is {}.";

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
    pub classifier: ClassifierConfig,
    pub documents: DocumentConfig,
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

        let endpoint = env::var("CLASSIFIER_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_CLASSIFIER_ENDPOINT.to_string());
        let api_token = env::var("HF_API_TOKEN")
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());
        let timeout_secs = parse_var("CLASSIFIER_TIMEOUT_SECS", 60u64)?;
        let hypothesis_template = env::var("CLASSIFIER_HYPOTHESIS_TEMPLATE")
            .unwrap_or_else(|_| DEFAULT_HYPOTHESIS_TEMPLATE.to_string());

        let classifier = ClassifierConfig {
            endpoint,
            api_token,
            timeout: Duration::from_secs(timeout_secs),
            hypothesis_template,
        };
        classifier.validate()?;

        let documents = DocumentConfig {
            max_extract_chars: parse_var("EXTRACT_MAX_CHARS", 4000usize)?,
            preview_chars: parse_var("PREVIEW_MAX_CHARS", 2000usize)?,
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", 20 * 1024 * 1024usize)?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            classifier,
            documents,
        })
    }
}

fn parse_var<T: FromStr>(variable: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { variable, value: raw }),
        Err(_) => Ok(default),
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

/// Log filter and formatting controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

/// Where and how to reach the zero-shot inference endpoint.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub endpoint: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
    pub hypothesis_template: String,
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint {
                value: self.endpoint.clone(),
            });
        }
        if !self.hypothesis_template.contains("{}") {
            return Err(ConfigError::InvalidHypothesisTemplate);
        }
        Ok(())
    }
}

/// Limits applied to uploaded documents and their extracted text.
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    pub max_extract_chars: usize,
    pub preview_chars: usize,
    pub max_upload_bytes: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { variable: &'static str, value: String },
    InvalidEndpoint { value: String },
    InvalidHypothesisTemplate,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { variable, value } => {
                write!(f, "{variable} must be a non-negative integer, got '{value}'")
            }
            ConfigError::InvalidEndpoint { value } => {
                write!(f, "classifier endpoint '{value}' must be an http(s) URL")
            }
            ConfigError::InvalidHypothesisTemplate => write!(
                f,
                "CLASSIFIER_HYPOTHESIS_TEMPLATE must contain a '{{}}' placeholder"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
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
        for variable in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "CLASSIFIER_ENDPOINT",
            "HF_API_TOKEN",
            "CLASSIFIER_TIMEOUT_SECS",
            "CLASSIFIER_HYPOTHESIS_TEMPLATE",
            "EXTRACT_MAX_CHARS",
            "PREVIEW_MAX_CHARS",
            "MAX_UPLOAD_BYTES",
        ] {
            env::remove_var(variable);
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
        assert!(config.telemetry.ansi);
        assert_eq!(config.classifier.endpoint, DEFAULT_CLASSIFIER_ENDPOINT);
        assert!(config.classifier.api_token.is_none());
        assert_eq!(config.classifier.timeout, Duration::from_secs(60));
        assert_eq!(config.documents.max_extract_chars, 4000);
        assert_eq!(config.documents.preview_chars, 2000);
        assert_eq!(config.documents.max_upload_bytes, 20 * 1024 * 1024);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn blank_token_is_treated_as_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("HF_API_TOKEN", "   ");
        let config = AppConfig::load().expect("config loads");
        assert!(config.classifier.api_token.is_none());
    }

    #[test]
    fn rejects_malformed_limits() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("EXTRACT_MAX_CHARS", "lots");
        let err = AppConfig::load().expect_err("non-numeric limit rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                variable: "EXTRACT_MAX_CHARS",
                ..
            }
        ));
        reset_env();
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CLASSIFIER_ENDPOINT", "ftp://models.example/bart");
        let err = AppConfig::load().expect_err("ftp endpoint rejected");
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
        reset_env();
    }

    #[test]
    fn production_disables_ansi_logs() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "prod");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert!(!config.telemetry.ansi);
        reset_env();
    }
}
