//! Auth Context
//!
//! Owns the [`AuthState`] and serializes the operations that may change it:
//! - mount resolution runs exactly once, however many callers await it
//! - a second login while one is in flight is rejected client-side, so at
//!   most one cookie-setting response can ever race
//! - logout transitions state only after the server response is awaited

use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell, RwLock};

use crate::api::{AuthApi, Session, UserInfo};
use crate::error::{ClientError, ClientResult};
use crate::state::AuthState;

pub struct AuthContext<A>
where
    A: AuthApi + Send + Sync + 'static,
{
    api: Arc<A>,
    state: RwLock<AuthState>,
    resolved: OnceCell<()>,
    login_lock: Mutex<()>,
}

impl<A> AuthContext<A>
where
    A: AuthApi + Send + Sync + 'static,
{
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: RwLock::new(AuthState::Loading),
            resolved: OnceCell::new(),
            login_lock: Mutex::new(()),
        }
    }

    /// Current state snapshot
    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    /// Resolve the session on mount.
    ///
    /// Exactly one `/me` call is issued no matter how many components await
    /// this; the state stays `Loading` until it settles. Any failure
    /// resolves to `Anonymous` and is logged, never surfaced: an unresolved
    /// session and no session look the same to the UI.
    pub async fn resolve(&self) {
        self.resolved
            .get_or_init(|| async {
                match self.api.me().await {
                    Ok(session) => {
                        *self.state.write().await = AuthState::Authenticated(session);
                    }
                    Err(ClientError::SessionExpired) => {
                        tracing::debug!("No live session at mount");
                        *self.state.write().await = AuthState::Anonymous;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "Session resolution failed; treating as anonymous");
                        *self.state.write().await = AuthState::Anonymous;
                    }
                }
            })
            .await;
    }

    /// Log in. Rejects re-entrant submissions while one is outstanding.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        let _guard = self
            .login_lock
            .try_lock()
            .map_err(|_| ClientError::LoginInFlight)?;

        let session = self.api.login(email, password).await?;
        *self.state.write().await = AuthState::Authenticated(session.clone());
        Ok(session)
    }

    /// Register a new account. Never changes the auth state; signing in
    /// afterwards is an explicit separate step.
    pub async fn register(&self, email: &str, password: &str) -> ClientResult<UserInfo> {
        self.api.register(email, password).await
    }

    /// Log out. The state transition happens strictly after the server
    /// response, so no code observes `Anonymous` while the cookie might
    /// still be live.
    pub async fn logout(&self) -> ClientResult<()> {
        self.api.logout().await?;
        *self.state.write().await = AuthState::Anonymous;
        Ok(())
    }
}
