//! Storefront Auth Client
//!
//! The browser-side half of the session system:
//! - [`api`] - transport seam and HTTP implementation (cookie jar owns the
//!   session artifact)
//! - [`state`] - the `Loading` / `Authenticated` / `Anonymous` machine
//! - [`context`] - single-flight mount resolution, re-entrancy-guarded
//!   login, awaited logout ordering
//! - [`guard`] - pure per-route render/redirect decisions

pub mod api;
pub mod context;
pub mod error;
pub mod guard;
pub mod state;


pub use api::{AuthApi, HttpAuthApi, Session, UserInfo};
pub use context::AuthContext;
pub use error::{ClientError, ClientResult};
pub use guard::{RouteDecision, RouteGuard, decide_nested};
pub use state::AuthState;
