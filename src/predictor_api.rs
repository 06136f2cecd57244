use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result as AnyResult};
use reqwest::blocking::Client;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::display::PredictionState;
use crate::http_client::http_client;
use crate::outcome::Outcome;

pub const ADD_OUTCOME_PATH: &str = "/add_outcome";
pub const DELETE_PREVIOUS_PATH: &str = "/delete_previous";
pub const RESET_SESSION_PATH: &str = "/reset_session";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned HTTP {0}")]
    Status(StatusCode),
    #[error("server rejected request: {0}")]
    Rejected(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Server-authoritative session state carried by every successful response.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub history: Vec<Outcome>,
    pub prediction: PredictionState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddOutcome(Outcome),
    DeletePrevious,
    ResetSession,
}

impl Action {
    pub fn path(self) -> &'static str {
        match self {
            Action::AddOutcome(_) => ADD_OUTCOME_PATH,
            Action::DeletePrevious => DELETE_PREVIOUS_PATH,
            Action::ResetSession => RESET_SESSION_PATH,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::AddOutcome(outcome) => write!(f, "add {}", outcome.code()),
            Action::DeletePrevious => f.write_str("delete previous"),
            Action::ResetSession => f.write_str("reset session"),
        }
    }
}

pub trait PredictorApi {
    fn add_outcome(&self, outcome: Outcome) -> Result<SessionSnapshot, ApiError>;
    fn delete_previous(&self) -> Result<SessionSnapshot, ApiError>;
    fn reset_session(&self) -> Result<SessionSnapshot, ApiError>;

    fn perform(&self, action: Action) -> Result<SessionSnapshot, ApiError> {
        match action {
            Action::AddOutcome(outcome) => self.add_outcome(outcome),
            Action::DeletePrevious => self.delete_previous(),
            Action::ResetSession => self.reset_session(),
        }
    }
}

pub struct HttpPredictorApi {
    client: Client,
    jar: Arc<Jar>,
    base_url: String,
    session_url: Url,
}

impl HttpPredictorApi {
    pub fn new(config: &AppConfig) -> AnyResult<Self> {
        let session_url = Url::parse(&format!("{}/", config.server_url))
            .with_context(|| format!("invalid server url {}", config.server_url))?;
        let jar = Arc::new(Jar::default());
        Ok(Self {
            client: http_client(config.request_timeout, jar.clone())?,
            jar,
            base_url: config.server_url.clone(),
            session_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Cookies the server has set so far, as a `Cookie` header value.
    pub fn session_cookie(&self) -> Option<String> {
        self.jar
            .cookies(&self.session_url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
            .filter(|value| !value.is_empty())
    }

    /// Seeds the jar with a header value previously returned by `session_cookie`.
    pub fn restore_session_cookie(&self, header: &str) {
        for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            self.jar
                .add_cookie_str(&format!("{pair}; Path=/"), &self.session_url);
        }
    }

    fn post(&self, path: &str, form: Option<&[(&str, &str)]>) -> Result<SessionSnapshot, ApiError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "posting action");

        let mut req = self.client.post(&url);
        if let Some(form) = form {
            req = req.form(form);
        }
        let resp = req.send()?;
        let status = resp.status();
        let body = resp.text()?;

        if !status.is_success() {
            // Some servers pair an error status with the usual failure envelope.
            return match parse_action_response_json(&body) {
                Err(ApiError::Rejected(msg)) => Err(ApiError::Rejected(msg)),
                _ => Err(ApiError::Status(status)),
            };
        }
        parse_action_response_json(&body)
    }
}

impl PredictorApi for HttpPredictorApi {
    fn add_outcome(&self, outcome: Outcome) -> Result<SessionSnapshot, ApiError> {
        let form = [("outcome", outcome.code())];
        self.post(ADD_OUTCOME_PATH, Some(&form[..]))
    }

    fn delete_previous(&self) -> Result<SessionSnapshot, ApiError> {
        self.post(DELETE_PREVIOUS_PATH, None)
    }

    fn reset_session(&self) -> Result<SessionSnapshot, ApiError> {
        self.post(RESET_SESSION_PATH, None)
    }
}

#[derive(Debug, Deserialize)]
struct ActionResponse {
    success: bool,
    history: Option<Vec<Outcome>>,
    prediction: Option<Outcome>,
    opposite: Option<Outcome>,
    confidence: Option<f64>,
    error: Option<String>,
}

pub fn parse_action_response_json(raw: &str) -> Result<SessionSnapshot, ApiError> {
    let resp: ActionResponse =
        serde_json::from_str(raw).map_err(|err| ApiError::Malformed(err.to_string()))?;

    if !resp.success {
        let msg = resp
            .error
            .filter(|msg| !msg.trim().is_empty())
            .unwrap_or_else(|| "unspecified error".to_string());
        return Err(ApiError::Rejected(msg));
    }

    let missing = |field: &str| ApiError::Malformed(format!("missing field `{field}`"));
    Ok(SessionSnapshot {
        history: resp.history.ok_or_else(|| missing("history"))?,
        prediction: PredictionState {
            predicted: resp.prediction.ok_or_else(|| missing("prediction"))?,
            opposite: resp.opposite.ok_or_else(|| missing("opposite"))?,
            confidence: resp.confidence.ok_or_else(|| missing("confidence"))?,
        },
    })
}
