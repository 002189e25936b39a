use admin_portal::{AppConfig, config::Env};
use serial_test::serial;
use std::{env, panic, path::PathBuf};

// --- Setup/Teardown Utilities ---

/// Utility to run a test function and restore environment variables afterward
fn run_with_env<T, R>(test: T, cleanup_vars: Vec<&'static str>) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(String, Option<String>)> = cleanup_vars
        .iter()
        .map(|&var| (var.to_string(), env::var(var).ok()))
        .collect();

    let result = panic::catch_unwind(test);

    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(&key, val);
            } else {
                env::remove_var(&key);
            }
        }
    }

    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_app_config_production_fail_fast() {
    let result = run_with_env(
        || {
            panic::catch_unwind(|| {
                unsafe {
                    env::set_var("APP_ENV", "production");
                    env::remove_var("JWT_SECRET");
                }
                AppConfig::load()
            })
        },
        vec!["APP_ENV", "JWT_SECRET"],
    );

    assert!(
        result.is_err(),
        "Production config loading should panic without JWT_SECRET"
    );
}

#[test]
#[serial]
fn test_app_config_production_with_secret() {
    let config = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "production");
                env::set_var("JWT_SECRET", "prod-secret");
                env::set_var("PAGES_ROOT", "/srv/portal");
                env::set_var("BIND_ADDR", "127.0.0.1:8080");
            }
            AppConfig::load()
        },
        vec!["APP_ENV", "JWT_SECRET", "PAGES_ROOT", "BIND_ADDR"],
    );

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.jwt_secret, "prod-secret");
    assert_eq!(config.pages_root, PathBuf::from("/srv/portal"));
    assert_eq!(config.bind_addr, "127.0.0.1:8080");
}

#[test]
#[serial]
fn test_app_config_local_env_defaults() {
    let config = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "local");
                env::remove_var("JWT_SECRET");
                env::remove_var("PAGES_ROOT");
                env::remove_var("BIND_ADDR");
            }
            AppConfig::load()
        },
        vec!["APP_ENV", "JWT_SECRET", "PAGES_ROOT", "BIND_ADDR"],
    );

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.pages_root, PathBuf::from("./web"));
    assert_eq!(config.bind_addr, "0.0.0.0:3000");
    assert_eq!(config.jwt_secret, "super-secure-test-secret-value-local");
}

#[test]
#[serial]
fn test_unknown_app_env_falls_back_to_local() {
    let config = run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "staging");
            }
            AppConfig::load()
        },
        vec!["APP_ENV"],
    );

    assert_eq!(config.env, Env::Local);
}
