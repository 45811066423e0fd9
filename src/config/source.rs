//! Gathering raw key-value data: the environment file and the live process environment.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;

use super::error::ConfigError;
use super::keys::ENV_KEYS;

/// Raw, untyped key-value data staged before decoding.
pub type RawVars = HashMap<String, String>;

/// Parse a dotenv-style file without touching the process environment.
///
/// Returns `Ok(None)` when the file does not exist. Later declarations of the
/// same key replace earlier ones.
///
/// # Errors
///
/// Returns `ConfigError::SourceUnavailable` if the file exists but cannot be
/// read or contains a malformed line.
pub fn read_env_file(path: &Path) -> Result<Option<RawVars>, ConfigError> {
    let unavailable = |source: dotenvy::Error| ConfigError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    };

    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => return Ok(None),
        Err(e) => return Err(unavailable(e)),
    };

    let mut vars = RawVars::new();
    for item in iter {
        let (key, value) = item.map_err(unavailable)?;
        vars.insert(key, value);
    }
    Ok(Some(vars))
}

/// Live lookup against the process environment.
pub fn process_env(name: &str) -> Option<OsString> {
    std::env::var_os(name)
}

/// Overlay live values for every recognized key on top of `base`.
///
/// A live value that is set but empty counts as unset unless `allow_empty`
/// is true.
///
/// # Errors
///
/// Returns `ConfigError::DecodeFailure` if a live value is not valid Unicode.
pub fn overlay<F>(mut base: RawVars, lookup: F, allow_empty: bool) -> Result<RawVars, ConfigError>
where
    F: Fn(&str) -> Option<OsString>,
{
    for key in ENV_KEYS {
        let Some(raw) = lookup(key.name) else {
            continue;
        };
        let value = raw
            .into_string()
            .map_err(|_| ConfigError::decode(key.name, "value is not valid unicode"))?;

        if value.is_empty() && !allow_empty {
            continue;
        }
        base.insert(key.name.to_string(), value);
    }
    Ok(base)
}
