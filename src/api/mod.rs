// SPDX-License-Identifier: MPL-2.0
//! HTTP boundary to the booking service.
//!
//! Every JSON endpoint answers with the same envelope: a string `code`
//! (`"1"` on success), an optional human-readable `message`, and an
//! optional `data` payload. Bodies are read as text first and parsed
//! with `serde_json`, so an error can always fall back through: server
//! message → raw body → the call site's generic text.
//!
//! The room administration forms are the exception: they answer with an
//! HTTP redirect whose `Location` carries a result flag parameter, which
//! is why the client never follows redirects itself (see
//! [`rooms`] and `nav::flags`).

pub mod admin;
pub mod auth;
pub mod rooms;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::nav::Route;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Envelope code the service uses for success.
pub const SUCCESS_CODE: &str = "1";

/// Generic text for transport-level failures.
pub const NETWORK_ERROR: &str = "Request failed. Please try again later.";

/// The service's response envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Success → the payload; failure → an [`Error::Api`] carrying the
    /// server message or `fallback`.
    pub fn into_data(self, fallback: &str) -> Result<Option<T>> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(Error::Api(best_message(
                self.message.as_deref(),
                "",
                fallback,
            )))
        }
    }
}

/// Picks the most readable error text available.
#[must_use]
pub fn best_message(server_message: Option<&str>, body: &str, fallback: &str) -> String {
    if let Some(message) = server_message {
        if !message.trim().is_empty() {
            return message.to_string();
        }
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    fallback.to_string()
}

/// Client bound to one service instance.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl ApiClient {
    /// Builds a client from preferences. Redirects are never followed:
    /// JSON endpoints do not redirect, and the room form endpoints'
    /// redirects are data the caller wants to see.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(config.timeout_secs()))
            .user_agent(concat!("RoomDesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            auth_token: None,
        })
    }

    /// Attaches the session token sent with subsequent requests.
    pub fn set_auth_token(&mut self, token: Option<String>) {
        self.auth_token = token;
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET returning the JSON envelope.
    pub async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        fallback: &str,
    ) -> Result<Envelope<T>> {
        let response = self
            .authorize(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(|_| Error::Http(NETWORK_ERROR.to_string()))?;
        Self::read_envelope(response, fallback).await
    }

    /// GET deserializing the whole body into `T` - for the few endpoints
    /// that report fields beside the envelope code instead of under
    /// `data`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> Result<T> {
        let response = self
            .authorize(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(|_| Error::Http(NETWORK_ERROR.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<T>(&body) {
            Ok(value) if status.is_success() => Ok(value),
            _ => Err(Error::Api(best_message(None, &body, fallback))),
        }
    }

    /// POST with a JSON body, returning the JSON envelope.
    pub async fn post_envelope<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<Envelope<T>> {
        let payload =
            serde_json::to_string(body).map_err(|e| Error::Api(format!("bad request body: {e}")))?;
        let response = self
            .authorize(self.http.post(self.url(path)))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|_| Error::Http(NETWORK_ERROR.to_string()))?;
        Self::read_envelope(response, fallback).await
    }

    /// POST with a form-encoded body, returning the raw body text.
    /// A non-success status surfaces the body (or `fallback`) as the
    /// error message.
    pub async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        fallback: &str,
    ) -> Result<String> {
        let response = self
            .authorize(self.http.post(self.url(path)))
            .form(fields)
            .send()
            .await
            .map_err(|_| Error::Http(NETWORK_ERROR.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status.is_success() {
            Ok(body)
        } else {
            Err(Error::Api(best_message(None, &body, fallback)))
        }
    }

    /// POST with a form-encoded body against an endpoint that answers
    /// with a redirect. Returns the `Location` parsed as a [`Route`].
    pub async fn post_form_redirect(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        fallback: &str,
    ) -> Result<Route> {
        let response = self
            .authorize(self.http.post(self.url(path)))
            .form(fields)
            .send()
            .await
            .map_err(|_| Error::Http(NETWORK_ERROR.to_string()))?;

        let status = response.status();
        if status.is_redirection() {
            let location = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|value| value.to_str().ok())
                .ok_or_else(|| Error::Route("redirect without a Location header".into()))?;
            return Route::parse(location);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Api(best_message(None, &body, fallback)))
    }

    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<Envelope<T>> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        match serde_json::from_str::<Envelope<T>>(&body) {
            Ok(envelope) if status.is_success() => Ok(envelope),
            Ok(envelope) => Err(Error::Api(best_message(
                envelope.message.as_deref(),
                &body,
                fallback,
            ))),
            Err(_) => Err(Error::Api(best_message(None, &body, fallback))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_yields_its_data() {
        let envelope: Envelope<u32> =
            serde_json::from_str(r#"{"code":"1","data":42}"#).expect("parse");
        assert!(envelope.is_success());
        assert_eq!(envelope.into_data("nope").unwrap(), Some(42));
    }

    #[test]
    fn failure_envelope_prefers_the_server_message() {
        let envelope: Envelope<u32> =
            serde_json::from_str(r#"{"code":"0","message":"Invalid captcha"}"#).expect("parse");
        let err = envelope.into_data("Login failed.").unwrap_err();
        assert_eq!(err.to_string(), "Invalid captcha");
    }

    #[test]
    fn failure_envelope_without_message_uses_the_fallback() {
        let envelope: Envelope<u32> = serde_json::from_str(r#"{"code":"0"}"#).expect("parse");
        let err = envelope.into_data("Login failed.").unwrap_err();
        assert_eq!(err.to_string(), "Login failed.");
    }

    #[test]
    fn best_message_falls_through_in_order() {
        assert_eq!(best_message(Some("server"), "body", "generic"), "server");
        assert_eq!(best_message(Some("  "), "body", "generic"), "body");
        assert_eq!(best_message(None, "body", "generic"), "body");
        assert_eq!(best_message(None, "   ", "generic"), "generic");
    }

    #[test]
    fn client_builds_from_default_config() {
        let client = ApiClient::new(&Config::default()).expect("client");
        assert_eq!(client.base_url(), crate::config::DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let mut config = Config::default();
        config.server.base_url = Some("https://rooms.example.com/".into());
        let client = ApiClient::new(&config).expect("client");
        assert_eq!(client.base_url(), "https://rooms.example.com");
        assert_eq!(client.url("/api/auth/login"), "https://rooms.example.com/api/auth/login");
    }
}
