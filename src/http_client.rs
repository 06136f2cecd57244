use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::cookie::Jar;

const USER_AGENT: &str = concat!("baccarat_terminal/", env!("CARGO_PKG_VERSION"));

/// One client per server session. The server keeps the outcome history in a
/// cookie session, so every response's `Set-Cookie` lands in `jar` and is sent
/// back on the next request.
pub fn http_client(timeout: Duration, jar: Arc<Jar>) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .cookie_provider(jar)
        .build()
        .context("failed to build http client")
}
