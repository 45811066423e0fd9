//! Application settings and configuration structures.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Value};
use serde::Deserialize;

use super::error::ConfigError;
use super::keys::{ValueKind, ENV_KEYS};
use super::source::{self, RawVars};

/// Root configuration structure containing all deployment settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// HTTP server configuration (port, environment, CORS)
    pub server: ServerSettings,

    /// PostgreSQL configuration
    pub database: DatabaseSettings,

    /// Redis configuration
    pub cache: CacheSettings,

    /// S3 object storage configuration
    pub storage: ObjectStorageSettings,

    /// Temporal workflow engine configuration
    pub workflow: WorkflowSettings,

    /// JWT authentication settings
    pub auth: AuthSettings,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Port to listen on, as text (`PORT`)
    pub port: String,

    /// Deployment environment, e.g. "development" or "production" (`ENVIRONMENT`)
    pub environment: String,

    /// Allowed CORS origins, comma-separated or `*` (`ALLOW_ORIGINS`)
    pub allow_origins: String,
}

/// PostgreSQL connection parameters.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
    pub name: String,

    /// libpq `sslmode`, e.g. "disable" or "require". Not validated.
    pub ssl_mode: String,
}

/// Redis connection parameters.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub host: String,
    pub port: String,

    /// May be empty
    pub password: String,

    /// Logical database index (`REDIS_DB`)
    pub database: u32,
}

/// S3 credentials and target bucket.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ObjectStorageSettings {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
}

/// Temporal connection parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorkflowSettings {
    /// `host:port` of the frontend service
    pub host_port: String,
    pub namespace: String,
    pub task_queue: String,
}

/// JWT signing configuration.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Secret key for signing tokens
    pub secret: String,

    /// Token lifetime in seconds (`JWT_EXPIRES_IN`)
    pub expires_in: i64,
}

/// Parsed form of [`ServerSettings::allow_origins`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

/// Controls where the loader looks and how strict it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Environment file to read, relative to the working directory unless absolute
    pub env_file: PathBuf,

    /// Fail with `SourceUnavailable` when `env_file` does not exist
    pub require_env_file: bool,

    /// Let a live variable set to "" override the file value
    pub allow_empty_env: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(".env"),
            require_env_file: true,
            allow_empty_env: false,
        }
    }
}

impl LoadOptions {
    pub fn env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = path.into();
        self
    }

    pub fn require_env_file(mut self, required: bool) -> Self {
        self.require_env_file = required;
        self
    }

    pub fn allow_empty_env(mut self, allow: bool) -> Self {
        self.allow_empty_env = allow;
        self
    }
}

impl Settings {
    /// Load settings from `./.env` and the process environment.
    ///
    /// Live environment variables take precedence over the file. The file is
    /// required; use [`Settings::load_with`] to relax that.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SourceUnavailable` if the file is missing or
    /// unreadable, and `ConfigError::DecodeFailure` if a value does not fit
    /// its field's type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(&LoadOptions::default())
    }

    /// Load settings using explicit options.
    ///
    /// # Errors
    ///
    /// See [`Settings::load`].
    pub fn load_with(options: &LoadOptions) -> Result<Self, ConfigError> {
        let base = match source::read_env_file(&options.env_file)? {
            Some(vars) => vars,
            None if options.require_env_file => {
                return Err(ConfigError::SourceUnavailable {
                    path: options.env_file.clone(),
                    source: dotenvy::Error::Io(std::io::ErrorKind::NotFound.into()),
                })
            }
            None => RawVars::new(),
        };

        let merged = source::overlay(base, source::process_env, options.allow_empty_env)?;
        Self::from_vars(&merged)
    }

    /// Decode already-merged key-value data.
    ///
    /// Only recognized keys are read; missing keys, and integer keys with an
    /// empty value, leave their field at its zero value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DecodeFailure` naming the offending key.
    pub fn from_vars(vars: &RawVars) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        for key in ENV_KEYS {
            let Some(raw) = vars.get(key.name) else {
                continue;
            };
            // An empty integer is treated like an absent one.
            if raw.is_empty() && key.kind != ValueKind::Text {
                continue;
            }
            let value = match key.kind {
                ValueKind::Text => Value::from(raw.as_str()),
                ValueKind::Integer => {
                    Value::from(parse_int(raw).map_err(|e| ConfigError::decode(key.name, e))?)
                }
                ValueKind::Index => {
                    let n = parse_int(raw).map_err(|e| ConfigError::decode(key.name, e))?;
                    if n < 0 {
                        return Err(ConfigError::decode(key.name, "must be >= 0"));
                    }
                    let n = u32::try_from(n).map_err(|_| {
                        ConfigError::decode(key.name, format!("must be at most {}", u32::MAX))
                    })?;
                    Value::from(i64::from(n))
                }
            };
            builder = builder.set_override(key.path, value)?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Address to bind the HTTP server to.
    pub fn server_addr(&self) -> String {
        format!("0.0.0.0:{}", self.server.port)
    }
}

/// Parse an optionally signed integer with an optional `0x`, `0o` or `0b` prefix.
fn parse_int(raw: &str) -> Result<i64, std::num::ParseIntError> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let (radix, digits) = match digits.get(..2) {
        Some("0x" | "0X") => (16, &digits[2..]),
        Some("0o" | "0O") => (8, &digits[2..]),
        Some("0b" | "0B") => (2, &digits[2..]),
        _ => return raw.parse(),
    };
    if digits.starts_with(['+', '-']) {
        // Fails with InvalidDigit, as "0x-5" should.
        return format!("0{digits}").parse();
    }

    // Re-attach the sign so i64::MIN still parses.
    let signed = if negative {
        format!("-{digits}")
    } else {
        digits.to_string()
    };
    i64::from_str_radix(&signed, radix)
}

impl ServerSettings {
    /// Port as a number, if it is one.
    pub fn port_number(&self) -> Option<u16> {
        self.port.parse().ok()
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Split `allow_origins` into individual origins.
    pub fn allowed_origins(&self) -> AllowedOrigins {
        if self.allow_origins.trim() == "*" {
            return AllowedOrigins::Any;
        }

        AllowedOrigins::List(
            self.allow_origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),
        )
    }
}

impl DatabaseSettings {
    /// Build a `postgres://` connection URL. User and password are percent-encoded.
    pub fn connection_url(&self) -> String {
        let mut url = format!(
            "postgres://{}:{}@{}:{}/{}",
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            self.name
        );
        if !self.ssl_mode.is_empty() {
            url.push_str("?sslmode=");
            url.push_str(&self.ssl_mode);
        }
        url
    }
}

impl CacheSettings {
    /// Build a `redis://` connection URL. The password is percent-encoded.
    pub fn connection_url(&self) -> String {
        if self.password.is_empty() {
            format!("redis://{}:{}/{}", self.host, self.port, self.database)
        } else {
            format!(
                "redis://:{}@{}:{}/{}",
                urlencoding::encode(&self.password),
                self.host,
                self.port,
                self.database
            )
        }
    }
}

const REDACTED: &str = "[redacted]";

/// Shows `[redacted]` for a set secret, `""` for an empty one.
fn redact(secret: &str) -> &str {
    if secret.is_empty() {
        ""
    } else {
        REDACTED
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &redact(&self.password))
            .field("name", &self.name)
            .field("ssl_mode", &self.ssl_mode)
            .finish()
    }
}

impl fmt::Debug for CacheSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &redact(&self.password))
            .field("database", &self.database)
            .finish()
    }
}

impl fmt::Debug for ObjectStorageSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStorageSettings")
            .field("region", &self.region)
            .field("access_key_id", &redact(&self.access_key_id))
            .field("secret_access_key", &redact(&self.secret_access_key))
            .field("bucket", &self.bucket)
            .finish()
    }
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("secret", &redact(&self.secret))
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

impl WorkflowSettings {
    /// Split `host_port` into host and numeric port.
    pub fn host_and_port(&self) -> Option<(&str, u16)> {
        let (host, port) = self.host_port.rsplit_once(':')?;
        if host.is_empty() {
            return None;
        }
        Some((host, port.parse().ok()?))
    }
}

impl AuthSettings {
    /// Token lifetime, or `None` if `expires_in` is negative.
    pub fn token_lifetime(&self) -> Option<Duration> {
        u64::try_from(self.expires_in).ok().map(Duration::from_secs)
    }
}
