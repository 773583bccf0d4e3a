use std::env;

use coaching_api::Config;
use pretty_assertions::assert_eq;
use serial_test::serial;

mod common;

const KEYS: [&str; 7] = [
    "DATABASE_URL",
    "JWT_SECRET",
    "JWT_EXPIRATION_DAYS",
    "HOST",
    "PORT",
    "ENVIRONMENT",
    "CLIENT_ORIGIN",
];

fn with_clean_env<F: FnOnce()>(f: F) {
    let saved: Vec<(&str, Option<String>)> =
        KEYS.iter().map(|k| (*k, env::var(k).ok())).collect();

    for key in KEYS {
        unsafe {
            env::remove_var(key);
        }
    }

    f();

    for (key, value) in saved {
        unsafe {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}

#[test]
#[serial]
fn defaults_apply_when_env_is_empty() {
    with_clean_env(|| {
        let config = Config::from_env_only().unwrap();

        assert_eq!(
            config.database_url,
            "postgres://@localhost:5432/coaching"
        );
        assert_eq!(config.jwt_expiration_days, 30);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, "development");
        assert_eq!(config.client_origin, "http://localhost:3000");
        assert!(config.is_development());
        assert!(!config.is_production());
    });
}

#[test]
#[serial]
fn custom_values_override_defaults() {
    with_clean_env(|| {
        unsafe {
            env::set_var("DATABASE_URL", "postgres://test@db:5432/coaching_test");
            env::set_var("JWT_SECRET", "test-secret");
            env::set_var("JWT_EXPIRATION_DAYS", "7");
            env::set_var("HOST", "0.0.0.0");
            env::set_var("PORT", "9000");
            env::set_var("ENVIRONMENT", "production");
        }

        let config = Config::from_env_only().unwrap();

        assert_eq!(
            config.database_url,
            "postgres://test@db:5432/coaching_test"
        );
        assert_eq!(config.jwt_secret, "test-secret");
        assert_eq!(config.jwt_expiration_days, 7);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert!(config.is_production());
        assert_eq!(config.server_address(), "0.0.0.0:9000");
    });
}

#[test]
#[serial]
fn unparseable_numbers_fall_back_to_defaults() {
    with_clean_env(|| {
        unsafe {
            env::set_var("PORT", "not-a-port");
            env::set_var("JWT_EXPIRATION_DAYS", "soon");
        }

        let config = Config::from_env_only().unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.jwt_expiration_days, 30);
    });
}
