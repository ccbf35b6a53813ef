//! Per-request lifecycle
//!
//! ```text
//! Idle -> CollectingPreferences -> Building -> Requesting -> Success -> Idle
//!                                     |             |
//!                                     +--> Failed <-+ -> Idle
//! ```

use thiserror::Error;

/// Where a recommendation request currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RequestState {
    /// Waiting for the user
    #[default]
    Idle,
    /// The user is filling in the form
    CollectingPreferences,
    /// Selecting candidates and composing the prompt
    Building,
    /// Waiting on the model
    Requesting,
    /// The model answered
    Success,
    /// Inventory or model failure
    Failed,
}

impl RequestState {
    /// Whether `next` is a legal successor of this state
    pub fn can_transition_to(self, next: RequestState) -> bool {
        use RequestState::*;
        matches!(
            (self, next),
            (Idle, CollectingPreferences)
                | (CollectingPreferences, Building)
                | (Building, Requesting)
                | (Building, Failed)
                | (Requesting, Success)
                | (Requesting, Failed)
                | (Success, Idle)
                | (Failed, Idle)
        )
    }

    /// Success or Failed
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestState::Success | RequestState::Failed)
    }

    /// Lowercase name for logs and output
    pub fn as_str(self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::CollectingPreferences => "collecting_preferences",
            RequestState::Building => "building",
            RequestState::Requesting => "requesting",
            RequestState::Success => "success",
            RequestState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected state change
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid request transition from {from} to {to}")]
pub struct InvalidTransition {
    /// State before the attempted change
    pub from: RequestState,
    /// Requested state
    pub to: RequestState,
}

/// Tracks one request at a time
#[derive(Debug, Clone, Default)]
pub struct RequestMachine {
    state: RequestState,
    last_outcome: Option<RequestState>,
}

impl RequestMachine {
    /// Start in Idle
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> RequestState {
        self.state
    }

    /// Terminal state reached by the most recent request, if any
    pub fn last_outcome(&self) -> Option<RequestState> {
        self.last_outcome
    }

    /// Move to `next`, rejecting illegal transitions
    pub fn transition(&mut self, next: RequestState) -> Result<(), InvalidTransition> {
        if !self.state.can_transition_to(next) {
            return Err(InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::debug!(from = %self.state, to = %next, "Request state");
        if next.is_terminal() {
            self.last_outcome = Some(next);
        }
        self.state = next;
        Ok(())
    }
}
