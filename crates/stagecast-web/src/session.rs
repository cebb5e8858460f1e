//! Display session state.
//!
//! One session spans a show call until its matching hide (or supersession
//! by the next show). All mutable session fields live in one value object
//! owned by the manager; timers and fade completions carry the session
//! token, so stale completions from a superseded session are dropped by a
//! plain equality check.

use serde::{Deserialize, Serialize};
use stagecast_common::MediaItemId;

/// Monotonic token identifying one display session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(u64);

/// Where the current session sits in its load/fade lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadPhase {
    /// No session has ever been shown.
    Idle,
    /// Navigation requested, engine has not reported loading yet.
    Navigating,
    /// Engine reported loading started.
    LoadInProgress,
    /// First load completion observed; zoom restoration may be settling.
    LoadComplete,
    /// Reveal fade started (or finished).
    Revealed,
    /// Hide requested, fade-out running.
    Hiding,
    /// Fade-out finished, surface hidden.
    Hidden,
}

/// Session state owned exclusively by the manager and mutated only on the
/// dispatch task.
#[derive(Debug)]
pub struct SessionState {
    pub token: SessionToken,
    pub phase: LoadPhase,
    /// True once the first load completion of this session has been
    /// observed. Suppresses duplicate "became visible" transitions from
    /// sub-frame loads.
    pub revealed: bool,
    /// Resolved navigable address for the current item; persistence key.
    pub current_address: Option<String>,
    pub current_item: Option<MediaItemId>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            token: SessionToken(0),
            phase: LoadPhase::Idle,
            revealed: false,
            current_address: None,
            current_item: None,
        }
    }

    /// Start a new session: bump the token (invalidating any in-flight
    /// timers of the previous session) and reset per-session state.
    pub fn begin_session(&mut self, item: MediaItemId) -> SessionToken {
        self.token = SessionToken(self.token.0 + 1);
        self.phase = LoadPhase::Navigating;
        self.revealed = false;
        self.current_address = None;
        self.current_item = Some(item);
        self.token
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_idle_and_unrevealed() {
        let state = SessionState::new();
        assert_eq!(state.phase, LoadPhase::Idle);
        assert!(!state.revealed);
        assert!(state.current_address.is_none());
        assert!(state.current_item.is_none());
    }

    #[test]
    fn begin_session_bumps_token_and_resets() {
        let mut state = SessionState::new();
        let t1 = state.begin_session(MediaItemId::from_string("a"));
        state.revealed = true;
        state.current_address = Some("pdf:///a.pdf".into());

        let t2 = state.begin_session(MediaItemId::from_string("b"));
        assert_ne!(t1, t2);
        assert_eq!(state.phase, LoadPhase::Navigating);
        assert!(!state.revealed);
        assert!(state.current_address.is_none());
        assert_eq!(state.current_item.as_ref().unwrap().as_str(), "b");
    }

    #[test]
    fn tokens_from_successive_sessions_never_collide() {
        let mut state = SessionState::new();
        let mut seen = std::collections::HashSet::new();
        for i in 0..100 {
            let t = state.begin_session(MediaItemId::from_string(format!("item-{i}")));
            assert!(seen.insert(t));
        }
    }
}
