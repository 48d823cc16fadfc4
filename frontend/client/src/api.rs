//! Auth API transport
//!
//! [`AuthApi`] is the seam the state machine drives; [`HttpAuthApi`] is the
//! real transport. The reqwest cookie jar holds the session cookie, so no
//! code in this crate ever sees or stores the token itself.

use kernel::role::Role;
use reqwest::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};

/// The signed-in user as the server reports it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
}

/// An authenticated identity: the user plus their role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: UserInfo,
    pub role: Role,
}

/// Transport seam for the auth endpoints
#[trait_variant::make(AuthApi: Send)]
pub trait LocalAuthApi {
    /// POST /api/auth/login
    async fn login(&self, email: &str, password: &str) -> ClientResult<Session>;
    /// POST /api/auth/register
    async fn register(&self, email: &str, password: &str) -> ClientResult<UserInfo>;
    /// GET /api/auth/me
    async fn me(&self) -> ClientResult<Session>;
    /// POST /api/auth/logout
    async fn logout(&self) -> ClientResult<()>;
}

// ============================================================================
// HTTP implementation
// ============================================================================

#[derive(Debug, Deserialize)]
struct SessionPayload {
    user: UserInfo,
    role: Role,
}

#[derive(Debug, Deserialize)]
struct RegisterPayload {
    user: UserInfo,
}

/// [`AuthApi`] over HTTP with a cookie jar
#[derive(Clone)]
pub struct HttpAuthApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    /// Build the transport. The cookie store is the one session-artifact
    /// holder in the client; everything else only sees [`Session`] values.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|err| ClientError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn error_reason(response: reqwest::Response) -> Option<String> {
        #[derive(Deserialize)]
        struct ProblemBody {
            detail: Option<String>,
        }
        response
            .json::<ProblemBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
    }
}

impl AuthApi for HttpAuthApi {
    async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&serde_json::json!({"email": email, "password": password}))
            .send()
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let payload: SessionPayload = response
                    .json()
                    .await
                    .map_err(|err| ClientError::Transport(err.to_string()))?;
                Ok(Session {
                    user: payload.user,
                    role: payload.role,
                })
            }
            StatusCode::UNAUTHORIZED => Err(ClientError::InvalidCredentials),
            status => Err(ClientError::Api {
                status: status.as_u16(),
            }),
        }
    }

    async fn register(&self, email: &str, password: &str) -> ClientResult<UserInfo> {
        let response = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&serde_json::json!({"email": email, "password": password}))
            .send()
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;

        match response.status() {
            StatusCode::CREATED => {
                let payload: RegisterPayload = response
                    .json()
                    .await
                    .map_err(|err| ClientError::Transport(err.to_string()))?;
                Ok(payload.user)
            }
            StatusCode::BAD_REQUEST => {
                let reason = Self::error_reason(response)
                    .await
                    .unwrap_or_else(|| "Registration failed".to_string());
                Err(ClientError::Rejected(reason))
            }
            status => Err(ClientError::Api {
                status: status.as_u16(),
            }),
        }
    }

    async fn me(&self) -> ClientResult<Session> {
        let response = self
            .client
            .get(self.url("/api/auth/me"))
            .send()
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let payload: SessionPayload = response
                    .json()
                    .await
                    .map_err(|err| ClientError::Transport(err.to_string()))?;
                Ok(Session {
                    user: payload.user,
                    role: payload.role,
                })
            }
            StatusCode::UNAUTHORIZED => Err(ClientError::SessionExpired),
            status => Err(ClientError::Api {
                status: status.as_u16(),
            }),
        }
    }

    async fn logout(&self) -> ClientResult<()> {
        let response = self
            .client
            .post(self.url("/api/auth/logout"))
            .send()
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::Api {
                status: response.status().as_u16(),
            })
        }
    }
}
