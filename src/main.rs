//! # Service Config
//!
//! Startup entry point. Loads the deployment configuration, reports it, and
//! exits non-zero if the configuration cannot be loaded.

use anyhow::{Context, Result};
use tracing::info;

use service_config::config::{LoadOptions, Settings};

/// Whether `ENV_FILE_OPTIONAL` asks to run without a `.env` file.
fn env_file_optional(value: Option<&str>) -> bool {
    value.is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    service_config::telemetry::init_tracing();

    let optional = env_file_optional(std::env::var("ENV_FILE_OPTIONAL").ok().as_deref());
    let options = LoadOptions::default().require_env_file(!optional);

    let settings = Settings::load_with(&options).context("failed to load configuration")?;

    // Secrets are never logged
    info!(
        addr = %settings.server_addr(),
        environment = %settings.server.environment,
        db_host = %settings.database.host,
        db_name = %settings.database.name,
        redis_host = %settings.cache.host,
        redis_db = settings.cache.database,
        s3_bucket = %settings.storage.bucket,
        temporal = %settings.workflow.host_port,
        token_lifetime_secs = settings.auth.expires_in,
        "Configuration loaded"
    );

    Ok(())
}
