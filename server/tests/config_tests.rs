use std::env;
use std::fs;

use registration_server::config::{AppConfig, FileConfig, SecretSource};
use serial_test::serial;

const VARS: [&str; 11] = [
    "CONFIG_PATH",
    "ADMIN_PIN",
    "ADMIN_SECRET",
    "DATA_FILE",
    "SERVER_HOST",
    "SERVER_PORT",
    "PORT",
    "EVENT_NAME",
    "SECURE_COOKIES",
    "VERCEL",
    "SERVERLESS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();

    let config = AppConfig::from_env().expect("default config");
    assert_eq!(config.admin_pin, "0000");
    assert_eq!(config.secret_source, SecretSource::DerivedFromPin);
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 3000);
}

#[test]
#[serial]
fn test_from_env_reads_variables() {
    clear_env();
    env::set_var("ADMIN_PIN", "8642");
    env::set_var("ADMIN_SECRET", "0123456789abcdef0123456789abcdef");
    env::set_var("PORT", "8081");
    env::set_var("DATA_FILE", "/var/lib/regs/registrations.json");

    let config = AppConfig::from_env().expect("config");
    clear_env();

    assert_eq!(config.admin_pin, "8642");
    assert_eq!(config.secret_source, SecretSource::Configured);
    assert_eq!(config.port, 8081);
    assert_eq!(
        config.data_file.to_str(),
        Some("/var/lib/regs/registrations.json")
    );
}

#[test]
#[serial]
fn test_from_env_reads_config_file() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registration.toml");
    fs::write(
        &path,
        r#"
admin_pin = "5555"
event_name = "Hackathon"
port = 4000
secure_cookies = true
"#,
    )
    .unwrap();
    env::set_var("CONFIG_PATH", &path);
    env::set_var("SERVER_PORT", "4100");

    let config = AppConfig::from_env().expect("config");
    clear_env();

    assert_eq!(config.admin_pin, "5555");
    assert_eq!(config.event_name, "Hackathon");
    assert_eq!(config.port, 4100);
    assert!(config.secure_cookies);
}

#[test]
#[serial]
fn test_missing_config_file_is_an_error() {
    clear_env();
    env::set_var("CONFIG_PATH", "nonexistent/registration.toml");

    let result = AppConfig::from_env();
    clear_env();

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_short_secret_refuses_to_start() {
    clear_env();
    env::set_var("ADMIN_SECRET", "too-short");

    let result = AppConfig::from_env();
    clear_env();

    assert!(result.is_err());
}

#[test]
fn test_example_config_file_parses() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/registration.example.toml");
    let file = FileConfig::load_from_file(path).expect("example config");

    assert_eq!(file.admin_pin.as_deref(), Some("0000"));
    assert!(file.admin_secret.is_none());
    assert_eq!(file.port, Some(3000));
    assert_eq!(file.secure_cookies, Some(false));
}
