//! # Configuration Module
//!
//! This module loads the deployment settings once at process start.
//! Values come from:
//! - A `.env` file in the working directory (parsed with dotenvy, never
//!   exported into the process environment)
//! - Live environment variables, which take precedence over the file
//!
//! ## Usage
//!
//! ```rust,ignore
//! use service_config::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Server will listen on {}", settings.server_addr());
//! ```

mod error;
pub mod keys;
mod settings;
pub mod source;

pub use error::*;
pub use settings::*;
