//! HTTP Identity Provider Adapter
//!
//! Pass-through adapter to the external identity service. Each method
//! translates failures to exactly one taxonomy variant; nothing here is
//! retried and the token body is never inspected.

use reqwest::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::email::Email;
use crate::domain::provider::{IdentityProvider, ProviderSession, ProviderUser};
use crate::error::{AuthError, AuthResult};

/// Configuration for the identity service endpoint
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL of the identity service (no trailing slash)
    pub base_url: String,
    /// Service API key sent with every request, if the deployment needs one
    pub api_key: Option<String>,
}

/// Identity service adapter over HTTP
#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    config: IdentityConfig,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: Uuid,
    email: String,
}

#[derive(Debug, Deserialize)]
struct TokenPayload {
    access_token: String,
    user: UserPayload,
}

/// Some deployments return the created user directly, others wrap it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpPayload {
    Direct(UserPayload),
    Wrapped { user: UserPayload },
}

impl HttpIdentityProvider {
    pub fn new(client: reqwest::Client, config: IdentityConfig) -> Self {
        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(key) = &self.config.api_key {
            builder = builder.header("apikey", key);
        }
        builder
    }

    async fn read_error_body(response: reqwest::Response) -> String {
        let body = response.text().await.unwrap_or_default();
        platform::http::error_message_from_body(&body)
    }
}

impl From<&UserPayload> for ProviderUser {
    fn from(payload: &UserPayload) -> Self {
        ProviderUser {
            id: payload.id,
            email: Email::from_trusted(payload.email.clone()),
        }
    }
}

impl IdentityProvider for HttpIdentityProvider {
    async fn password_grant(&self, email: &Email, password: &str) -> AuthResult<ProviderSession> {
        let response = self
            .request(reqwest::Method::POST, "/token?grant_type=password")
            .json(&serde_json::json!({
                "email": email.as_str(),
                "password": password,
            }))
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let payload: TokenPayload = response
                    .json()
                    .await
                    .map_err(|e| AuthError::Provider(e.to_string()))?;
                Ok(ProviderSession {
                    access_token: payload.access_token,
                    user: ProviderUser::from(&payload.user),
                })
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let message = Self::read_error_body(response).await;
                tracing::debug!(message = %message, "Provider rejected credentials");
                Err(AuthError::InvalidCredentials)
            }
            status => {
                let message = Self::read_error_body(response).await;
                Err(AuthError::Provider(format!("{status}: {message}")))
            }
        }
    }

    async fn create_account(&self, email: &Email, password: &str) -> AuthResult<ProviderUser> {
        let response = self
            .request(reqwest::Method::POST, "/signup")
            .json(&serde_json::json!({
                "email": email.as_str(),
                "password": password,
            }))
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let payload: SignUpPayload = response
                    .json()
                    .await
                    .map_err(|e| AuthError::Provider(e.to_string()))?;
                let user = match &payload {
                    SignUpPayload::Direct(user) => user,
                    SignUpPayload::Wrapped { user } => user,
                };
                Ok(ProviderUser::from(user))
            }
            status if status.is_client_error() => {
                let message = Self::read_error_body(response).await;
                Err(AuthError::Registration(message))
            }
            status => {
                let message = Self::read_error_body(response).await;
                Err(AuthError::Provider(format!("{status}: {message}")))
            }
        }
    }

    async fn verify_token(&self, token: &str) -> AuthResult<ProviderUser> {
        let response = self
            .request(reqwest::Method::GET, "/user")
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let payload: UserPayload = response
                    .json()
                    .await
                    .map_err(|e| AuthError::Provider(e.to_string()))?;
                Ok(ProviderUser::from(&payload))
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(AuthError::InvalidSession)
            }
            status => {
                let message = Self::read_error_body(response).await;
                Err(AuthError::Provider(format!("{status}: {message}")))
            }
        }
    }

    async fn revoke_token(&self, token: &str) -> AuthResult<()> {
        let response = self
            .request(reqwest::Method::POST, "/logout")
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            // A token the provider no longer knows is already revoked.
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(()),
            status => {
                let message = Self::read_error_body(response).await;
                Err(AuthError::Provider(format!("{status}: {message}")))
            }
        }
    }
}
