use anyhow::{Context, Result, bail};

use baccarat_terminal::config::AppConfig;
use baccarat_terminal::logging;
use baccarat_terminal::outcome::Outcome;
use baccarat_terminal::predictor_api::{Action, HttpPredictorApi};
use baccarat_terminal::provider::run_command;
use baccarat_terminal::session_file::{load_session_cookie, save_session_cookie};
use baccarat_terminal::state::{AppState, Delta, apply_delta};

const USAGE: &str = "usage: session_ctl <add P|B|T | undo | reset>";

fn parse_action(args: &[String]) -> Result<Action> {
    match args {
        [cmd, code] if cmd == "add" => {
            let outcome: Outcome = code.parse()?;
            Ok(Action::AddOutcome(outcome))
        }
        [cmd] if cmd == "undo" => Ok(Action::DeletePrevious),
        [cmd] if cmd == "reset" => Ok(Action::ResetSession),
        _ => bail!(USAGE),
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let action = parse_action(&args)?;

    let config = AppConfig::load();
    logging::init_stderr_logging()?;
    let api = HttpPredictorApi::new(&config).context("failed to set up client")?;
    // Without a session file each run starts a fresh server session.
    if let Some(path) = config.session_file.as_deref()
        && let Some(cookie) = load_session_cookie(path, api.base_url())
    {
        api.restore_session_cookie(&cookie);
    }

    let mut state = AppState::with_bootstrap(&config.bootstrap);
    let cmd = state.issue(action);
    let delta = run_command(&api, cmd);
    let failure = match &delta {
        Delta::Failed { error, .. } => Some(error.clone()),
        _ => None,
    };
    apply_delta(&mut state, delta);

    if let Some(path) = config.session_file.as_deref()
        && let Some(cookie) = api.session_cookie()
    {
        save_session_cookie(path, api.base_url(), &cookie)?;
    }

    if let Some(error) = failure {
        bail!("{action} failed: {error}");
    }
    println!("{}", state.view.to_text());
    Ok(())
}
