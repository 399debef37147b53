//! # Session State
//!
//! Who is signed in and which cash session is open, shared by every
//! component that talks to the store API.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       SessionState (cheap to clone)                     │
//! │                                                                         │
//! │  ┌──────────────────────────┐   ┌──────────────────────────────────┐   │
//! │  │  token                   │   │  active_session                  │   │
//! │  │  Arc<RwLock<Option<..>>> │   │  Arc<RwLock<Option<CashSession>>>│   │
//! │  │                          │   │                                  │   │
//! │  │  read by ApiClient on    │   │  written by the workflow after   │   │
//! │  │  every request           │   │  open/close/refresh              │   │
//! │  └──────────────────────────┘   └──────────────────────────────────┘   │
//! │                                                                         │
//! │  Clones share the same locks. Poisoned locks read as "empty".           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, RwLock};

use essence_core::CashSession;

/// Shared sign-in and register state.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    token: Arc<RwLock<Option<String>>>,
    active_session: Arc<RwLock<Option<CashSession>>>,
}

impl SessionState {
    /// Creates an empty state (signed out, no session).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state already holding a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        let state = Self::new();
        state.set_token(Some(token.into()));
        state
    }

    // =========================================================================
    // Token
    // =========================================================================

    /// Returns the current bearer token.
    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    /// Replaces the bearer token. Blank tokens are stored as `None`.
    pub fn set_token(&self, token: Option<String>) {
        let token = token.filter(|t| !t.trim().is_empty());
        if let Ok(mut t) = self.token.write() {
            *t = token;
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .map(|t| t.is_some())
            .unwrap_or(false)
    }

    // =========================================================================
    // Active Session
    // =========================================================================

    /// Returns the open cash session, if one is known.
    pub fn active_session(&self) -> Option<CashSession> {
        self.active_session.read().ok().and_then(|s| s.clone())
    }

    /// Records the session returned by the API. Closed sessions clear the slot.
    pub fn set_active_session(&self, session: Option<CashSession>) {
        let session = session.filter(CashSession::is_open);
        if let Ok(mut s) = self.active_session.write() {
            *s = session;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use essence_core::{Money, SessionStatus};

    fn session(status: SessionStatus) -> CashSession {
        CashSession {
            id: "s-1".to_string(),
            opening_cash: Money::from_units(50_000),
            opened_at: Utc::now(),
            status,
            closed_at: None,
            closing_cash: None,
            opened_by: None,
            notes: None,
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let state = SessionState::new();
        assert!(!state.is_authenticated());

        state.set_token(Some("abc".to_string()));
        assert_eq!(state.token().as_deref(), Some("abc"));

        state.set_token(Some("   ".to_string()));
        assert!(state.token().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let state = SessionState::with_token("abc");
        let other = state.clone();

        other.set_active_session(Some(session(SessionStatus::Open)));
        assert_eq!(state.active_session().map(|s| s.id), Some("s-1".to_string()));

        state.set_token(None);
        state.set_active_session(None);
        assert!(other.token().is_none());
        assert!(other.active_session().is_none());
    }

    #[test]
    fn test_closed_session_is_not_kept() {
        let state = SessionState::new();
        state.set_active_session(Some(session(SessionStatus::Closed)));
        assert!(state.active_session().is_none());
    }
}
