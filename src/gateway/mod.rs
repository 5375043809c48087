//! # Gateway Module
//!
//! Typed access to the music backend's REST API. The [`Gateway`] value is
//! built once at startup from the configured URLs and, once a user signs in,
//! carries the session credential. It is handed to the stores that need it;
//! there is no global client.
//!
//! ```text
//! CLI / Management Layer
//!          ↓
//! Gateway
//!     ├── Auth      (register, login, profile)
//!     ├── Songs     (list, upload, update, delete)
//!     ├── Albums    (list, create, update, delete)
//!     └── Playlists (mine, create, update, delete)
//!          ↓
//! normalize (inbound JSON → Track / Album / Playlist / User)
//!          ↓
//! HTTP Layer (reqwest, JSON, multipart)
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`GatewayError`]. Non-success responses carry the
//! backend's `error` message when it sends one. Calls are never retried; the
//! caller shows a notice and the user repeats the action.
//!
//! ## Authentication
//!
//! Protected endpoints send the credential in the `auth-token` header. They
//! fail locally with [`GatewayError::Unauthorized`] when no credential is set,
//! without touching the network.

pub mod albums;
pub mod auth;
pub mod normalize;
pub mod playlists;
pub mod songs;

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use crate::error::GatewayError;
use normalize::NormalizeContext;

pub const AUTH_HEADER: &str = "auth-token";

pub struct Gateway {
    http: Client,
    api_url: String,
    media_url: String,
    token: Option<String>,
}

impl Gateway {
    pub fn new(api_url: &str, media_url: &str) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("tunedeck/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            media_url: media_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn context(&self) -> NormalizeContext<'_> {
        NormalizeContext::new(&self.media_url)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Attaches the credential, or refuses when there is none.
    fn authorized(&self, req: RequestBuilder) -> Result<RequestBuilder, GatewayError> {
        match &self.token {
            Some(token) => Ok(req.header(AUTH_HEADER, token)),
            None => Err(GatewayError::Unauthorized),
        }
    }

    /// Attaches the credential when there is one; the endpoint is public.
    fn maybe_authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.header(AUTH_HEADER, token),
            None => req,
        }
    }

    /// Sends the request and parses the body as JSON.
    ///
    /// An empty success body yields `Value::Null`. `fallback` is the message
    /// used when an error response carries no reason of its own.
    async fn send_json(
        &self,
        req: RequestBuilder,
        fallback: Option<&str>,
    ) -> Result<Value, GatewayError> {
        let response = req.send().await?;
        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await?;

        debug!(%url, status = status.as_u16(), bytes = body.len(), "gateway response");

        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message: error_message(&body, fallback)
                    .or_else(|| status.canonical_reason().map(str::to_string))
                    .unwrap_or_else(|| "Request failed".to_string()),
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| GatewayError::Malformed(e.to_string()))
    }

    async fn send_empty(
        &self,
        req: RequestBuilder,
        fallback: Option<&str>,
    ) -> Result<(), GatewayError> {
        self.send_json(req, fallback).await.or_else(|e| match e {
            // DELETE endpoints sometimes answer with plain text
            GatewayError::Malformed(_) => Ok(Value::Null),
            other => Err(other),
        })?;
        Ok(())
    }
}

/// Picks the reason out of an error body.
///
/// Order: JSON `error`, JSON `message`, then `fallback`, then a non-JSON
/// body as-is.
fn error_message(body: &str, fallback: Option<&str>) -> Option<String> {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let from_json = parsed.as_ref().and_then(|v| {
        ["error", "message"]
            .iter()
            .find_map(|k| v.get(*k).and_then(Value::as_str).map(str::to_string))
    });

    from_json
        .or_else(|| fallback.map(str::to_string))
        .or_else(|| {
            let trimmed = body.trim();
            (parsed.is_none() && !trimmed.is_empty()).then(|| trimmed.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::error_message;

    #[test]
    fn error_field_wins_over_fallback() {
        let msg = error_message(r#"{"error":"Email taken"}"#, Some("Registration failed"));
        assert_eq!(msg.as_deref(), Some("Email taken"));
    }

    #[test]
    fn fallback_used_when_json_has_no_reason() {
        let msg = error_message(r#"{"ok":false}"#, Some("Login failed"));
        assert_eq!(msg.as_deref(), Some("Login failed"));
    }

    #[test]
    fn plain_text_body_used_without_fallback() {
        let msg = error_message("Song not found", None);
        assert_eq!(msg.as_deref(), Some("Song not found"));
        assert_eq!(error_message("", None), None);
    }
}
