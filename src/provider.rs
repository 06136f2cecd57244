use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::predictor_api::{ApiError, PredictorApi};
use crate::state::{Delta, ProviderCommand};

/// Runs every command against `api` on a background thread, one at a time,
/// and reports each result as a `Delta`. Exits once either channel closes.
pub fn spawn_provider<A>(api: A, tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) -> JoinHandle<()>
where
    A: PredictorApi + Send + 'static,
{
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            let delta = run_command(&api, cmd);
            if tx.send(delta).is_err() {
                debug!("ui side hung up, stopping provider");
                break;
            }
        }
    })
}

pub fn run_command<A: PredictorApi + ?Sized>(api: &A, cmd: ProviderCommand) -> Delta {
    match cmd {
        ProviderCommand::Perform { seq, action } => {
            debug!(seq, %action, "performing action");
            match api.perform(action) {
                Ok(snapshot) => Delta::Applied {
                    seq,
                    action,
                    snapshot,
                },
                Err(err) => {
                    if matches!(err, ApiError::Transport(_) | ApiError::Status(_)) {
                        warn!(seq, %action, error = %err, "transport failure");
                    }
                    Delta::Failed {
                        seq,
                        action,
                        error: err.to_string(),
                    }
                }
            }
        }
    }
}
