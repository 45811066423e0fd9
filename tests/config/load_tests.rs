//! Load Tests
//!
//! End-to-end behavior of `Settings::load_with` against real files and the
//! process environment.

use pretty_assertions::assert_eq;
use service_config::config::{ErrorKind, Settings};

use crate::common::{with_live_env, TestEnvFile};

/// Live environment values win over the file
#[test]
fn test_live_environment_takes_precedence() {
    let file = TestEnvFile::new("PORT=8080\nDB_HOST=localhost\n");

    let settings = with_live_env(&[("PORT", "9090")], || {
        Settings::load_with(&file.options())
    })
    .unwrap();

    assert_eq!(settings.server.port, "9090");
    assert_eq!(settings.database.host, "localhost");
}

/// File-only keys pass through, integers decoded as integers
#[test]
fn test_file_values_pass_through() {
    let file = TestEnvFile::new("JWT_EXPIRES_IN=3600\nDB_PASSWORD=\"hunter 2\"\n");

    let settings = with_live_env(&[], || Settings::load_with(&file.options())).unwrap();

    assert_eq!(settings.auth.expires_in, 3600);
    assert_eq!(settings.database.password, "hunter 2");
}

/// Keys absent everywhere stay at their zero value
#[test]
fn test_absent_keys_are_zero() {
    let file = TestEnvFile::new("# nothing but a comment\n\n");

    let settings = with_live_env(&[], || Settings::load_with(&file.options())).unwrap();

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.cache.database, 0);
}

/// Malformed integer from the file fails the whole load
#[test]
fn test_bad_integer_in_file_fails() {
    let file = TestEnvFile::new("PORT=8080\nREDIS_DB=not-a-number\n");

    let err = with_live_env(&[], || Settings::load_with(&file.options())).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DecodeFailure);
    assert_eq!(err.field(), Some("REDIS_DB"));
}

/// Malformed integer from the live environment fails too
#[test]
fn test_bad_integer_in_environment_fails() {
    let file = TestEnvFile::new("JWT_EXPIRES_IN=3600\n");

    let err = with_live_env(&[("JWT_EXPIRES_IN", "forever")], || {
        Settings::load_with(&file.options())
    })
    .unwrap_err();

    assert_eq!(err.field(), Some("JWT_EXPIRES_IN"));
}

/// A required but missing file fails even with a complete live environment
#[test]
fn test_missing_required_file_fails() {
    let file = TestEnvFile::missing();

    let err = with_live_env(&[("PORT", "8080"), ("DB_HOST", "db")], || {
        Settings::load_with(&file.options())
    })
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    assert!(err.to_string().contains(".env"));
}

/// With the file optional, the live environment alone is enough
#[test]
fn test_missing_optional_file_uses_environment() {
    let file = TestEnvFile::missing();
    let options = file.options().require_env_file(false);

    let settings = with_live_env(&[("PORT", "8080"), ("REDIS_DB", "4")], || {
        Settings::load_with(&options)
    })
    .unwrap();

    assert_eq!(settings.server.port, "8080");
    assert_eq!(settings.cache.database, 4);
}

/// A directory where the file should be is unreadable, not missing
#[test]
fn test_unreadable_file_fails_even_when_optional() {
    let file = TestEnvFile::missing();
    std::fs::create_dir(&file.path).unwrap();
    let options = file.options().require_env_file(false);

    let err = with_live_env(&[], || Settings::load_with(&options)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
}

/// An empty live variable does not clobber the file unless allowed
#[test]
fn test_empty_live_value() {
    let file = TestEnvFile::new("REDIS_PASSWORD=from-file\n");

    let kept = with_live_env(&[("REDIS_PASSWORD", "")], || {
        Settings::load_with(&file.options())
    })
    .unwrap();
    assert_eq!(kept.cache.password, "from-file");

    let cleared = with_live_env(&[("REDIS_PASSWORD", "")], || {
        Settings::load_with(&file.options().allow_empty_env(true))
    })
    .unwrap();
    assert_eq!(cleared.cache.password, "");
}

/// Unknown keys in either source are ignored
#[test]
fn test_unknown_keys_ignored() {
    let file = TestEnvFile::new("SOMETHING_ELSE=1\nport=lowercase\n");

    let settings = with_live_env(&[("ANOTHER_UNKNOWN", "x")], || {
        Settings::load_with(&file.options())
    })
    .unwrap();

    assert_eq!(settings, Settings::default());
}

/// Loading does not export file values into the process environment
#[test]
fn test_file_is_not_exported() {
    let file = TestEnvFile::new("TEMPORAL_NAMESPACE=default\n");

    with_live_env(&[], || {
        let settings = Settings::load_with(&file.options()).unwrap();
        assert_eq!(settings.workflow.namespace, "default");
        assert!(std::env::var_os("TEMPORAL_NAMESPACE").is_none());
    });
}

/// Two loads of an unchanged environment are equal
#[test]
fn test_load_is_idempotent() {
    let file = TestEnvFile::new("PORT=8080\nREDIS_DB=2\nJWT_SECRET=abc\n");

    let (first, second) = with_live_env(&[("DB_NAME", "main")], || {
        (
            Settings::load_with(&file.options()).unwrap(),
            Settings::load_with(&file.options()).unwrap(),
        )
    });

    assert_eq!(first, second);
}

/// Typical development `.env`
#[test]
fn test_development_env_file() {
    let file = TestEnvFile::new(
        "PORT=8080\n\
         ENVIRONMENT=development\n\
         DB_HOST=localhost\n\
         DB_PORT=5432\n\
         REDIS_DB=0\n\
         JWT_EXPIRES_IN=86400\n",
    );

    let settings = with_live_env(&[], || Settings::load_with(&file.options())).unwrap();

    assert_eq!(settings.server.port, "8080");
    assert_eq!(settings.server.environment, "development");
    assert_eq!(settings.database.host, "localhost");
    assert_eq!(settings.database.port, "5432");
    assert_eq!(settings.cache.database, 0);
    assert_eq!(settings.auth.expires_in, 86400);
}
