//! Recognized environment keys and where they land in [`Settings`](super::Settings).

/// How the raw text of a key is converted before decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Kept verbatim.
    Text,
    /// Signed 64-bit integer.
    Integer,
    /// Unsigned 32-bit integer (an index, never negative).
    Index,
}

/// A single recognized environment key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvKey {
    /// Exact, case-sensitive environment variable name
    pub name: &'static str,

    /// Dotted path of the destination field
    pub path: &'static str,

    /// Declared value type
    pub kind: ValueKind,
}

const fn text(name: &'static str, path: &'static str) -> EnvKey {
    EnvKey {
        name,
        path,
        kind: ValueKind::Text,
    }
}

/// Every key the loader knows about. Anything else in the environment is ignored.
pub const ENV_KEYS: &[EnvKey] = &[
    // Server
    text("PORT", "server.port"),
    text("ENVIRONMENT", "server.environment"),
    text("ALLOW_ORIGINS", "server.allow_origins"),
    // Database
    text("DB_HOST", "database.host"),
    text("DB_PORT", "database.port"),
    text("DB_USER", "database.user"),
    text("DB_PASSWORD", "database.password"),
    text("DB_NAME", "database.name"),
    text("DB_SSLMODE", "database.ssl_mode"),
    // Cache
    text("REDIS_HOST", "cache.host"),
    text("REDIS_PORT", "cache.port"),
    text("REDIS_PASSWORD", "cache.password"),
    EnvKey {
        name: "REDIS_DB",
        path: "cache.database",
        kind: ValueKind::Index,
    },
    // Object storage
    text("AWS_REGION", "storage.region"),
    text("AWS_ACCESS_KEY_ID", "storage.access_key_id"),
    text("AWS_SECRET_ACCESS_KEY", "storage.secret_access_key"),
    text("AWS_S3_BUCKET", "storage.bucket"),
    // Workflow engine
    text("TEMPORAL_HOST_PORT", "workflow.host_port"),
    text("TEMPORAL_NAMESPACE", "workflow.namespace"),
    text("TEMPORAL_TASK_QUEUE", "workflow.task_queue"),
    // Auth
    text("JWT_SECRET", "auth.secret"),
    EnvKey {
        name: "JWT_EXPIRES_IN",
        path: "auth.expires_in",
        kind: ValueKind::Integer,
    },
];

/// Look up a recognized key by its exact name.
pub fn find(name: &str) -> Option<&'static EnvKey> {
    ENV_KEYS.iter().find(|key| key.name == name)
}
