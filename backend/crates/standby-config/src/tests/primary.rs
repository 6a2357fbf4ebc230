use crate::tests::{EnvGuard, clean_env};
use crate::{Config, PrimaryConfig, ServerConfig};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err, ok};
use serial_test::serial;

#[test]
fn given_defaults_when_args_then_gunicorn_style_invocation() {
    // Given
    let primary = PrimaryConfig::default();
    let server = ServerConfig { port: 10000 };

    // When
    let args = primary.args(&server);

    // Then
    assert_eq!(
        args,
        vec![
            "wsgi:app",
            "--bind",
            "0.0.0.0:10000",
            "--timeout",
            "120",
            "--workers",
            "1",
            "--threads",
            "4",
        ]
    );
}

#[test]
fn given_zero_workers_when_validate_then_error() {
    // Given
    let primary = PrimaryConfig {
        workers: 0,
        ..PrimaryConfig::default()
    };

    // When
    let result = primary.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("primary.workers"));
}

#[test]
fn given_zero_threads_when_validate_then_error() {
    let primary = PrimaryConfig {
        threads: 0,
        ..PrimaryConfig::default()
    };

    assert_that!(primary.validate(), err(anything()));
}

#[test]
fn given_zero_timeout_when_validate_then_error() {
    let primary = PrimaryConfig {
        timeout_secs: 0,
        ..PrimaryConfig::default()
    };

    assert_that!(primary.validate(), err(anything()));
}

#[test]
fn given_blank_program_when_validate_then_error() {
    let primary = PrimaryConfig {
        program: String::from("  "),
        ..PrimaryConfig::default()
    };

    assert_that!(primary.validate(), err(anything()));
}

#[test]
fn given_no_fatal_markers_when_validate_then_error() {
    let primary = PrimaryConfig {
        fatal_markers: Vec::new(),
        ..PrimaryConfig::default()
    };

    assert_that!(primary.validate(), err(anything()));
}

#[test]
fn given_empty_fatal_marker_when_validate_then_error() {
    let primary = PrimaryConfig {
        fatal_markers: vec![String::from("ImportError"), String::new()],
        ..PrimaryConfig::default()
    };

    assert_that!(primary.validate(), err(anything()));
}

#[test]
#[serial]
fn given_primary_env_vars_when_load_then_primary_overridden() {
    // Given
    let _env = clean_env();
    let _program = EnvGuard::set("STANDBY_PRIMARY_PROGRAM", "/usr/local/bin/gunicorn");
    let _workers = EnvGuard::set("STANDBY_PRIMARY_WORKERS", "2");
    let _markers = EnvGuard::set(
        "STANDBY_PRIMARY_FATAL_MARKERS",
        "ImportError, SyntaxError,,",
    );

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(
        config.primary.program.as_str(),
        eq("/usr/local/bin/gunicorn")
    );
    assert_that!(config.primary.workers, eq(2));
    assert_eq!(config.primary.fatal_markers, vec!["ImportError", "SyntaxError"]);
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_port_env_when_primary_args_then_bind_uses_port() {
    // Given
    let _env = clean_env();
    let _port = EnvGuard::set("PORT", "7000");

    // When
    let config = Config::load().unwrap();
    let args = config.primary_args();

    // Then
    assert_that!(args[2].as_str(), eq("0.0.0.0:7000"));
}
