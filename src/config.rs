//! Configuration loading and constants.
//!
//! Loads the listen address, shutdown grace period and log format from an
//! optional TOML file, then applies environment overrides. `AppConfig` is the
//! root configuration struct containing all settings.

use const_format::formatcp;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

use crate::error::ConfigError;

// =============================================================================
// Response Constants
// =============================================================================

/// Service name reported in the greeting
pub const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");

/// Body returned by `GET /`, identical for every request
pub const GREETING: &str = formatcp!(
    "Hello from {} v{}, running on K3s and delivered by ArgoCD!\n",
    SERVICE_NAME,
    env!("CARGO_PKG_VERSION")
);

/// Body returned by the liveness probe
pub const HEALTH_BODY: &str = "ok";

/// Root responses must be revalidated so a new rollout's greeting is seen immediately
pub const CACHE_CONTROL_ROOT: &str = "no-cache";

// =============================================================================
// Defaults
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Environment variable naming an alternative configuration file
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

/// Environment variable the orchestrator uses to remap the listen port
pub const PORT_ENV: &str = "PORT";

/// Environment variable overriding `logging.format`
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default bind host (all interfaces, as required inside a container)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Default graceful shutdown window, matching Kubernetes' terminationGracePeriodSeconds
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 30;

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "hello_k3s=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Seconds in-flight connections get to finish after a shutdown signal
    #[serde(default = "HttpServerConfig::default_shutdown_grace")]
    pub shutdown_grace_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_grace_seconds: Self::default_shutdown_grace(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_PORT
    }

    fn default_shutdown_grace() -> u64 {
        DEFAULT_SHUTDOWN_GRACE_SECS
    }

    /// Resolve host and port into the address the listener binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid http.host or http.port '{}:{}': {}",
                    self.host, self.port, e
                ))
            })
    }
}

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn log_format(&self) -> Result<LogFormat, ConfigError> {
        match self.format.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::Validation(format!(
                "Unknown logging.format '{}', expected \"text\" or \"json\"",
                other
            ))),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration for process startup.
    ///
    /// `explicit` is a path the operator asked for (CLI flag or `CONFIG_PATH`)
    /// and must exist. Without one, `DEFAULT_CONFIG_PATH` is used if present
    /// and built-in defaults apply otherwise, so the binary runs with no
    /// arguments and no files.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::load(path)
                } else {
                    tracing::debug!(path = %path.display(), "No config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// `PORT` and `LOG_FORMAT` are recognized. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        if let Some(raw) = read(PORT_ENV) {
            let port = raw.parse::<u16>().ok().filter(|port| *port != 0);
            self.http.port = port.ok_or_else(|| {
                ConfigError::Validation(format!(
                    "{} must be a port number between 1 and 65535, got '{}'",
                    PORT_ENV, raw
                ))
            })?;
        }

        if let Some(raw) = read(LOG_FORMAT_ENV) {
            self.logging.format = raw;
        }

        self.validate()
    }

    /// Check the settings the process cannot start with.
    ///
    /// Port 0 is refused: the kernel would pick an ephemeral port that the
    /// Service's `targetPort` never reaches.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Validation(
                "http.port must be between 1 and 65535, got 0".to_string(),
            ));
        }
        self.http.socket_addr()?;
        self.logging.log_format()?;
        Ok(())
    }
}
