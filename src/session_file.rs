use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const SESSION_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionFile {
    version: u32,
    server_url: String,
    cookie: String,
}

/// Reads the cookie saved for `server_url`. A missing file, an unreadable one,
/// another version, or a cookie saved for a different server all read as none.
pub fn load_session_cookie(path: &Path, server_url: &str) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    let file = serde_json::from_str::<SessionFile>(&raw).ok()?;
    if file.version != SESSION_VERSION || file.server_url != server_url {
        return None;
    }
    Some(file.cookie).filter(|cookie| !cookie.is_empty())
}

pub fn save_session_cookie(path: &Path, server_url: &str, cookie: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = SessionFile {
        version: SESSION_VERSION,
        server_url: server_url.to_string(),
        cookie: cookie.to_string(),
    };
    let raw = serde_json::to_string_pretty(&file).context("failed to encode session file")?;
    fs::write(path, raw).with_context(|| format!("failed to write {}", path.display()))
}
