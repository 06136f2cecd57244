use std::collections::VecDeque;

use tracing::{info, warn};

use crate::display::{self, Bootstrap, DisplayView};
use crate::predictor_api::{Action, SessionSnapshot};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone)]
pub struct AppState {
    pub view: DisplayView,
    pub server_url: String,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub in_flight: usize,
    next_seq: u64,
    last_applied_seq: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            view: DisplayView::new(),
            server_url: String::new(),
            logs: VecDeque::new(),
            help_overlay: false,
            in_flight: 0,
            next_seq: 1,
            last_applied_seq: 0,
        }
    }

    pub fn with_bootstrap(bootstrap: &Bootstrap) -> Self {
        let mut state = Self::new();
        display::initialize(&mut state.view, bootstrap);
        state
    }

    /// Stamps an action with the next sequence number.
    pub fn issue(&mut self, action: Action) -> ProviderCommand {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight += 1;
        ProviderCommand::Perform { seq, action }
    }

    /// Undoes the bookkeeping of `issue` when the command never left.
    pub fn abandon(&mut self, seq: u64) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.push_log(format!("[WARN] Request #{seq} could not be sent"));
    }

    pub fn last_applied_seq(&self) -> u64 {
        self.last_applied_seq
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        let stamp = chrono::Local::now().format("%H:%M:%S");
        self.logs.push_back(format!("{stamp} {}", msg.into()));
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Delta {
    Applied {
        seq: u64,
        action: Action,
        snapshot: SessionSnapshot,
    },
    Failed {
        seq: u64,
        action: Action,
        error: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderCommand {
    Perform { seq: u64, action: Action },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::Applied {
            seq,
            action,
            snapshot,
        } => {
            state.in_flight = state.in_flight.saturating_sub(1);
            if seq <= state.last_applied_seq {
                info!(seq, last = state.last_applied_seq, "discarding stale response");
                state.push_log(format!(
                    "[INFO] Dropped stale response #{seq} ({action}); #{} already shown",
                    state.last_applied_seq
                ));
                return;
            }
            state.last_applied_seq = seq;
            display::render_history(&mut state.view, &snapshot.history);
            display::render_prediction_state(&mut state.view, &snapshot.prediction);
            info!(
                seq,
                %action,
                prediction = %snapshot.prediction.predicted,
                confidence = snapshot.prediction.confidence,
                "applied response"
            );
        }
        Delta::Failed { seq, action, error } => {
            state.in_flight = state.in_flight.saturating_sub(1);
            warn!(seq, %action, %error, "action failed");
            state.push_log(format!("[WARN] {action} failed: {error}"));
        }
    }
}
