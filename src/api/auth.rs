// SPDX-License-Identifier: MPL-2.0
//! Authentication endpoints: captcha, login, registration and password
//! reset with emailed verification codes.

use super::{best_message, ApiClient, Envelope};
use crate::error::{Error, Result};
use crate::session::UserProfile;
use serde::{Deserialize, Serialize};

const CAPTCHA_PATH: &str = "/api/auth/captchaImage";
const LOGIN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/auth/register";
const SEND_REGISTER_CODE_PATH: &str = "/api/auth/sendRegisterCode";
const SEND_RESET_CODE_PATH: &str = "/api/auth/sendForgetPwdCode";
const RESET_PASSWORD_PATH: &str = "/api/auth/forgetPwd";

/// A captcha challenge: opaque key plus a data-URL image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captcha {
    pub key: String,
    pub image: String,
}

impl Captcha {
    /// Decodes the data-URL image into raw bytes for rendering.
    /// Returns `None` when the payload is not a base64 data URL.
    #[must_use]
    pub fn image_bytes(&self) -> Option<Vec<u8>> {
        use base64::{engine::general_purpose::STANDARD, Engine as _};

        let encoded = self.image.split_once("base64,")?.1;
        STANDARD.decode(encoded.trim()).ok()
    }
}

/// The captcha endpoint reports its fields beside the envelope code,
/// not under `data`.
#[derive(Debug, Deserialize)]
struct CaptchaResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "captchaKey")]
    captcha_key: Option<String>,
    #[serde(default, rename = "captchaImage")]
    captcha_image: Option<String>,
}

/// Fetches a fresh captcha challenge.
pub async fn fetch_captcha(client: &ApiClient) -> Result<Captcha> {
    const FALLBACK: &str = "Failed to load captcha. Please refresh and try again.";

    let response: CaptchaResponse = client.get_json(CAPTCHA_PATH, FALLBACK).await?;

    if response.code != super::SUCCESS_CODE {
        return Err(Error::Api(best_message(
            response.message.as_deref(),
            "",
            FALLBACK,
        )));
    }

    match (response.captcha_key, response.captcha_image) {
        (Some(key), Some(image)) => Ok(Captcha { key, image }),
        _ => Err(Error::Api(FALLBACK.to_string())),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub captcha_code: String,
    pub captcha_key: String,
}

/// Payload of a successful login: token plus profile summary.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
    #[serde(flatten)]
    pub profile: UserProfile,
}

/// Signs in. On failure the caller reloads the captcha.
pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<LoginData> {
    const FALLBACK: &str = "Login failed. Please try again.";

    let envelope: Envelope<LoginData> =
        client.post_envelope(LOGIN_PATH, request, FALLBACK).await?;
    envelope
        .into_data(FALLBACK)?
        .ok_or_else(|| Error::Api(FALLBACK.to_string()))
}

/// Role requested at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RegisterRole {
    #[default]
    User,
    Admin,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub register_code: String,
    pub role: RegisterRole,
    /// Required by the service when `role` is `Admin`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_key: Option<String>,
}

/// Requests a registration verification code for `email`.
pub async fn send_register_code(client: &ApiClient, email: &str) -> Result<()> {
    const FALLBACK: &str = "Failed to send verification code. Please try again.";

    let body = serde_json::json!({ "email": email });
    let envelope: Envelope<serde_json::Value> = client
        .post_envelope(SEND_REGISTER_CODE_PATH, &body, FALLBACK)
        .await?;
    envelope.into_data(FALLBACK).map(|_| ())
}

/// Creates an account.
pub async fn register(client: &ApiClient, request: &RegisterRequest) -> Result<()> {
    const FALLBACK: &str = "Registration failed. Please try again.";

    let envelope: Envelope<serde_json::Value> =
        client.post_envelope(REGISTER_PATH, request, FALLBACK).await?;
    envelope.into_data(FALLBACK).map(|_| ())
}

/// Requests a password-reset verification code for `email`.
pub async fn send_reset_code(client: &ApiClient, email: &str) -> Result<()> {
    const FALLBACK: &str = "Failed to send verification code. Please try again.";

    let body = serde_json::json!({ "email": email });
    let envelope: Envelope<serde_json::Value> = client
        .post_envelope(SEND_RESET_CODE_PATH, &body, FALLBACK)
        .await?;
    envelope.into_data(FALLBACK).map(|_| ())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub password: String,
    pub forget_pwd_code: String,
}

/// Sets a new password using an emailed reset code.
pub async fn reset_password(client: &ApiClient, request: &ResetPasswordRequest) -> Result<()> {
    const FALLBACK: &str = "Password reset failed. Please try again.";

    let envelope: Envelope<serde_json::Value> = client
        .post_envelope(RESET_PASSWORD_PATH, request, FALLBACK)
        .await?;
    envelope.into_data(FALLBACK).map(|_| ())
}
