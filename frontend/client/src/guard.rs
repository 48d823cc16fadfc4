//! Route Guard
//!
//! A pure decision function over [`AuthState`] and the route's allowed
//! roles. Rendering and navigation are the caller's job; this module only
//! decides.

use kernel::role::Role;

use crate::state::AuthState;

/// What the router should do with a guarded route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session resolution outstanding; render neutral, do not navigate
    Loading,
    /// The caller may render the route
    Render,
    /// No session; send the user to the login view
    RedirectToLogin,
    /// Authenticated but not allowed here; soft redirect to the default
    /// view, not an error
    RedirectToDefault,
}

/// Per-route role requirement. Defaults to allowing every signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    allowed_roles: Vec<Role>,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self {
            allowed_roles: vec![Role::Administrator, Role::Customer],
        }
    }
}

impl RouteGuard {
    pub fn any_user() -> Self {
        Self::default()
    }

    pub fn admin_only() -> Self {
        Self::allowing([Role::Administrator])
    }

    pub fn allowing(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed_roles: roles.into_iter().collect(),
        }
    }

    pub fn decide(&self, state: &AuthState) -> RouteDecision {
        match state {
            AuthState::Loading => RouteDecision::Loading,
            AuthState::Anonymous => RouteDecision::RedirectToLogin,
            AuthState::Authenticated(session) => {
                if self.allowed_roles.contains(&session.role) {
                    RouteDecision::Render
                } else {
                    RouteDecision::RedirectToDefault
                }
            }
        }
    }
}

/// Decide for nested guards, outermost first. The first non-render
/// decision wins; `Render` means every guard agreed.
pub fn decide_nested<'a>(
    guards: impl IntoIterator<Item = &'a RouteGuard>,
    state: &AuthState,
) -> RouteDecision {
    for guard in guards {
        match guard.decide(state) {
            RouteDecision::Render => continue,
            decision => return decision,
        }
    }
    RouteDecision::Render
}
