//! # Service Config
//!
//! Startup-time configuration loader for the backend service.
//!
//! Reads deployment settings (HTTP port, PostgreSQL, Redis, S3, Temporal,
//! JWT) from a `.env` file and the process environment, and decodes them
//! into a typed [`config::Settings`] value that the rest of the process
//! receives at construction time.
//!
//! ## Module Structure
//!
//! ```text
//! service_config/
//! +-- config/     Key table, sources, typed settings, errors
//! +-- telemetry/  Tracing subscriber setup
//! ```

// Configuration module
pub mod config;

// Telemetry and observability
pub mod telemetry;
