use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::display::Bootstrap;
use crate::outcome::Outcome;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub server_url: String,
    pub request_timeout: Duration,
    pub log_file: Option<PathBuf>,
    pub session_file: Option<PathBuf>,
    pub bootstrap: Bootstrap,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_file: None,
            session_file: None,
            bootstrap: Bootstrap::default(),
        }
    }
}

impl AppConfig {
    /// Loads `.env.local` then `.env` (neither is required) and reads the
    /// `BACCARAT_*` variables on top of the defaults.
    pub fn load() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let server_url = lookup("BACCARAT_SERVER_URL")
            .map(|raw| raw.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.server_url);

        let timeout_secs = lookup("BACCARAT_TIMEOUT_SECS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(1);

        let path_var = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
                .map(PathBuf::from)
        };
        let log_file = path_var("BACCARAT_LOG_FILE");
        let session_file = path_var("BACCARAT_SESSION_FILE");

        let bootstrap = Bootstrap {
            prediction: lookup("BACCARAT_BOOT_PREDICTION")
                .and_then(|raw| Outcome::from_code(&raw))
                .unwrap_or(defaults.bootstrap.prediction),
            opposite: lookup("BACCARAT_BOOT_OPPOSITE")
                .and_then(|raw| Outcome::from_code(&raw))
                .unwrap_or(defaults.bootstrap.opposite),
            confidence: lookup("BACCARAT_BOOT_CONFIDENCE")
                .and_then(|raw| raw.trim().parse::<f64>().ok())
                .filter(|c| c.is_finite()),
        };

        Self {
            server_url,
            request_timeout: Duration::from_secs(timeout_secs),
            log_file,
            session_file,
            bootstrap,
        }
    }
}
