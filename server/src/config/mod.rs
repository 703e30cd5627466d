use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::auth_token::{secret_from_pin, MIN_SECRET_LEN};
use crate::error::{AppError, Result};

pub const DEFAULT_PIN: &str = "0000";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_EVENT_NAME: &str = "Event Registration";
const DATA_FILE_NAME: &str = "registrations.json";

/// Optional TOML file named by `CONFIG_PATH`. Environment variables win over
/// anything set here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub admin_pin: Option<String>,
    pub admin_secret: Option<String>,
    pub data_file: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub event_name: Option<String>,
    pub secure_cookies: Option<bool>,
}

impl FileConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;

        let config: FileConfig = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    Configured,
    DerivedFromPin,
}

#[derive(Clone)]
pub struct AppConfig {
    pub admin_pin: String,
    pub admin_secret: String,
    pub secret_source: SecretSource,
    pub data_file: PathBuf,
    pub host: String,
    pub port: u16,
    pub event_name: String,
    pub secure_cookies: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("admin_pin", &"<redacted>")
            .field("admin_secret", &"<redacted>")
            .field("secret_source", &self.secret_source)
            .field("data_file", &self.data_file)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("event_name", &self.event_name)
            .field("secure_cookies", &self.secure_cookies)
            .finish()
    }
}

impl AppConfig {
    /// Reads `CONFIG_PATH` (if set) and then the process environment.
    pub fn from_env() -> Result<Self> {
        let file = match env::var("CONFIG_PATH") {
            Ok(path) if !path.trim().is_empty() => FileConfig::load_from_file(path)?,
            _ => FileConfig::default(),
        };
        Self::resolve(file, |key| env::var(key).ok())
    }

    /// Merges a file config with a variable lookup. Empty variables count as
    /// unset.
    pub fn resolve<F>(file: FileConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let admin_pin = var("ADMIN_PIN")
            .or(file.admin_pin)
            .unwrap_or_else(|| DEFAULT_PIN.to_string());

        let (admin_secret, secret_source) = match var("ADMIN_SECRET").or(file.admin_secret) {
            Some(secret) => {
                if secret.len() < MIN_SECRET_LEN {
                    return Err(AppError::Config(format!(
                        "ADMIN_SECRET must be at least {} bytes",
                        MIN_SECRET_LEN
                    )));
                }
                (secret, SecretSource::Configured)
            }
            None => (secret_from_pin(&admin_pin), SecretSource::DerivedFromPin),
        };

        let ephemeral = var("VERCEL").is_some() || var("SERVERLESS").is_some();
        let data_file = var("DATA_FILE")
            .map(PathBuf::from)
            .or(file.data_file)
            .unwrap_or_else(|| default_data_file(ephemeral));

        let host = var("SERVER_HOST")
            .or(file.host)
            .unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match var("SERVER_PORT").or_else(|| var("PORT")) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid port: {}", raw)))?,
            None => file.port.unwrap_or(DEFAULT_PORT),
        };

        let event_name = var("EVENT_NAME")
            .or(file.event_name)
            .unwrap_or_else(|| DEFAULT_EVENT_NAME.to_string());

        let secure_cookies = match var("SECURE_COOKIES") {
            Some(raw) => parse_flag(&raw),
            None => file.secure_cookies.unwrap_or(false),
        };

        Ok(Self {
            admin_pin,
            admin_secret,
            secret_source,
            data_file,
            host,
            port,
            event_name,
            secure_cookies,
        })
    }
}

/// Serverless platforms only allow writes under the temp directory.
pub fn default_data_file(ephemeral: bool) -> PathBuf {
    if ephemeral {
        env::temp_dir().join(DATA_FILE_NAME)
    } else {
        Path::new("data").join(DATA_FILE_NAME)
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
