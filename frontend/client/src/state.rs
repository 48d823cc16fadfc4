//! Auth State Machine
//!
//! The enum shape is the invariant: user and role exist exactly when the
//! state is `Authenticated`, and nowhere else.

use kernel::role::Role;

use crate::api::Session;

/// Client-side view of the session
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    /// Initial resolution against `/me` is still outstanding
    #[default]
    Loading,
    /// A live session exists
    Authenticated(Session),
    /// Resolution finished without a session
    Anonymous,
}

impl AuthState {
    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            AuthState::Authenticated(session) => Some(session.role),
            AuthState::Loading | AuthState::Anonymous => None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            AuthState::Loading | AuthState::Anonymous => None,
        }
    }
}
