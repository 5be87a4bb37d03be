//! HTTP identity client.
//!
//! Performs the interactive sign-in round trip against the configured
//! authority and publishes auth-state changes on a watch channel. The rest
//! of the application only ever sees the [`IdentityProvider`] boundary; the
//! HTTP clients additionally consume the bearer token through
//! [`TokenProvider`].

use crate::dto::{TokenRequestDto, TokenResponseDto};
use crate::http::send_checked;
use crate::token::TokenProvider;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use std::sync::RwLock;
use tokio::sync::watch;
use vantage_core::auth::AuthSnapshot;
use vantage_core::config::IdentityConfig;
use vantage_core::error::{Result, VantageError};
use vantage_core::services::IdentityProvider;

#[derive(Debug, Default)]
struct TokenState {
    access_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

/// Identity provider backed by the configured OAuth authority.
pub struct HttpIdentityClient {
    client: Client,
    authority: String,
    client_id: String,
    redirect_url: String,
    state: RwLock<TokenState>,
    notifications: watch::Sender<AuthSnapshot>,
}

impl HttpIdentityClient {
    pub fn new(config: &IdentityConfig) -> Self {
        let (notifications, _) = watch::channel(AuthSnapshot::unauthorized());
        Self {
            client: Client::new(),
            authority: config.authority.clone(),
            client_id: config.client_id.clone(),
            redirect_url: config.redirect_url.clone(),
            state: RwLock::new(TokenState::default()),
            notifications,
        }
    }

    /// Publishes the current authorization state to all subscribers.
    fn publish(&self) {
        let snapshot = AuthSnapshot {
            is_authorized: self.is_authorized(),
        };
        self.notifications.send_replace(snapshot);
    }

    fn clear_token(&self) -> bool {
        let mut state = self.state.write().unwrap();
        let had_token = state.access_token.is_some();
        *state = TokenState::default();
        had_token
    }
}

/// Reads the `exp` claim out of a JWT access token, when the token is one.
fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?.as_i64()?;
    DateTime::from_timestamp(exp, 0)
}

impl TokenProvider for HttpIdentityClient {
    fn access_token(&self) -> Option<String> {
        let state = self.state.read().unwrap();
        if let Some(expires_at) = state.expires_at {
            if Utc::now() >= expires_at {
                return None;
            }
        }
        state.access_token.clone()
    }
}

#[async_trait::async_trait]
impl IdentityProvider for HttpIdentityClient {
    fn is_authorized(&self) -> bool {
        let state = self.state.read().unwrap();
        match (&state.access_token, state.expires_at) {
            (Some(_), Some(expires_at)) => Utc::now() < expires_at,
            (Some(_), None) => true,
            _ => false,
        }
    }

    fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.notifications.subscribe()
    }

    async fn sign_in(&self) -> Result<()> {
        let url = format!("{}/oauth/token", self.authority);
        let body = TokenRequestDto {
            client_id: &self.client_id,
            redirect_uri: &self.redirect_url,
            grant_type: "interactive",
        };

        match send_checked(self.client.post(&url).json(&body)).await {
            Ok(response) => {
                let dto: TokenResponseDto = response
                    .json()
                    .await
                    .map_err(|e| VantageError::transport(e.to_string()))?;

                let expires_at = jwt_expiry(&dto.access_token).or_else(|| {
                    dto.expires_in
                        .map(|secs| Utc::now() + Duration::seconds(secs as i64))
                });

                {
                    let mut state = self.state.write().unwrap();
                    state.access_token = Some(dto.access_token);
                    state.expires_at = expires_at;
                }
                self.publish();
                Ok(())
            }
            Err(e) => {
                self.clear_token();
                self.publish();
                Err(e)
            }
        }
    }

    async fn sign_out(&self) -> Result<()> {
        let had_token = self.clear_token();
        if had_token {
            // Best-effort revoke; local sign-out succeeds regardless.
            let url = format!("{}/oauth/revoke", self.authority);
            let body = serde_json::json!({ "clientId": self.client_id });
            if let Err(e) = send_checked(self.client.post(&url).json(&body)).await {
                tracing::debug!(error = %e, "token revocation failed");
            }
        }
        self.publish();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpIdentityClient {
        HttpIdentityClient::new(&IdentityConfig::default())
    }

    fn token_with_exp(exp: i64) -> String {
        let payload = URL_SAFE_NO_PAD.encode(format!("{{\"exp\":{exp}}}"));
        format!("header.{payload}.signature")
    }

    #[test]
    fn jwt_expiry_reads_the_exp_claim() {
        let expiry = jwt_expiry(&token_with_exp(4_102_444_800)).unwrap();
        assert_eq!(expiry, DateTime::from_timestamp(4_102_444_800, 0).unwrap());
    }

    #[test]
    fn jwt_expiry_tolerates_opaque_tokens() {
        assert_eq!(jwt_expiry("not-a-jwt"), None);
    }

    #[test]
    fn unauthorized_until_a_token_arrives() {
        let identity = client();
        assert!(!identity.is_authorized());
        assert!(identity.access_token().is_none());
    }

    #[test]
    fn an_expired_token_is_not_an_authorization() {
        let identity = client();
        {
            let mut state = identity.state.write().unwrap();
            state.access_token = Some("stale".to_string());
            state.expires_at = Some(Utc::now() - Duration::seconds(1));
        }
        assert!(!identity.is_authorized());
        assert!(identity.access_token().is_none());
    }

    #[tokio::test]
    async fn sign_out_without_a_token_notifies_unauthorized() {
        let identity = client();
        let mut rx = identity.subscribe();

        identity.sign_out().await.unwrap();

        rx.changed().await.unwrap();
        assert!(!rx.borrow().is_authorized);
    }
}
