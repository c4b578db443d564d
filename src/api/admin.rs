// SPDX-License-Identifier: MPL-2.0
//! Administration endpoints: user accounts, booking decisions, service
//! settings.
//!
//! The account and booking actions are form posts against the
//! server-rendered admin controllers; their error bodies are plain text
//! and are surfaced verbatim when present.

use super::{ApiClient, Envelope};
use crate::error::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const USERS_PATH: &str = "/api/admin/users";
const BOOKINGS_PATH: &str = "/api/admin/bookings";
const TEST_EMAIL_PATH: &str = "/api/admin/settings/testEmail";
const BACKUP_PATH: &str = "/api/admin/backup";

/// One user account row, built once at fetch time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub role: crate::session::Role,
    pub locked: bool,
    #[serde(default)]
    pub lock_reason: Option<String>,
}

/// Booking lifecycle states as the service spells them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

/// One booking row with everything the details view shows, typed at
/// fetch time instead of re-read from the rendered markup per click.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRow {
    pub id: u64,
    pub room_name: String,
    #[serde(default)]
    pub room_location: Option<String>,
    pub username: String,
    pub user_email: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: BookingStatus,
    #[serde(default)]
    pub reason: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Fetches the user accounts list.
pub async fn list_users(client: &ApiClient) -> Result<Vec<UserRow>> {
    const FALLBACK: &str = "Failed to load user accounts.";
    let envelope: Envelope<Vec<UserRow>> = client.get_envelope(USERS_PATH, FALLBACK).await?;
    Ok(envelope.into_data(FALLBACK)?.unwrap_or_default())
}

/// Fetches the bookings list.
pub async fn list_bookings(client: &ApiClient) -> Result<Vec<BookingRow>> {
    const FALLBACK: &str = "Failed to load bookings.";
    let envelope: Envelope<Vec<BookingRow>> = client.get_envelope(BOOKINGS_PATH, FALLBACK).await?;
    Ok(envelope.into_data(FALLBACK)?.unwrap_or_default())
}

/// Lock or unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockAction {
    Lock,
    Unlock,
}

impl LockAction {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LockAction::Lock => "lock",
            LockAction::Unlock => "unlock",
        }
    }

    /// Past-tense verb for feedback copy.
    #[must_use]
    pub fn past_tense(&self) -> &'static str {
        match self {
            LockAction::Lock => "locked",
            LockAction::Unlock => "unlocked",
        }
    }
}

/// Locks or unlocks an account, with an optional reason for the audit
/// trail. The reason may be empty.
pub async fn set_user_lock(
    client: &ApiClient,
    user_id: u64,
    action: LockAction,
    reason: &str,
) -> Result<()> {
    let path = format!("/admin/users/{user_id}/{}", action.as_str());
    let fallback = format!("Failed to {} user.", action.as_str());
    client
        .post_form(&path, &[("reason", reason)], &fallback)
        .await
        .map(|_| ())
}

/// Approves a booking.
pub async fn approve_booking(client: &ApiClient, booking_id: u64) -> Result<()> {
    let path = format!("/admin/bookings/{booking_id}/approve");
    client
        .post_form(&path, &[], "Error approving booking.")
        .await
        .map(|_| ())
}

/// Rejects a booking. The service requires a reason.
pub async fn reject_booking(client: &ApiClient, booking_id: u64, reason: &str) -> Result<()> {
    let path = format!("/admin/bookings/{booking_id}/reject");
    client
        .post_form(&path, &[("reason", reason)], "Error rejecting booking.")
        .await
        .map(|_| ())
}

/// Service settings sections saved independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSection {
    General,
    Reservation,
    Admin,
    Email,
    AutoBackup,
}

impl SettingsSection {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsSection::General => "general",
            SettingsSection::Reservation => "reservation",
            SettingsSection::Admin => "admin",
            SettingsSection::Email => "email",
            SettingsSection::AutoBackup => "autoBackup",
        }
    }

    /// Feedback copy shown when the section saves.
    #[must_use]
    pub fn saved_message(&self) -> &'static str {
        match self {
            SettingsSection::General => "General settings saved.",
            SettingsSection::Reservation => "Reservation settings saved.",
            SettingsSection::Admin => "Administrator settings saved.",
            SettingsSection::Email => "Email settings saved.",
            SettingsSection::AutoBackup => "Automatic backup settings saved.",
        }
    }
}

/// Saves one settings section. Values travel as a flat string map.
pub async fn save_settings(
    client: &ApiClient,
    section: SettingsSection,
    values: &[(String, String)],
) -> Result<()> {
    const FALLBACK: &str = "Failed to save settings.";
    let path = format!("/api/admin/settings/{}", section.as_str());
    let body: serde_json::Map<String, serde_json::Value> = values
        .iter()
        .map(|(key, value)| (key.clone(), serde_json::Value::String(value.clone())))
        .collect();
    let envelope: Envelope<serde_json::Value> =
        client.post_envelope(&path, &body, FALLBACK).await?;
    envelope.into_data(FALLBACK).map(|_| ())
}

#[derive(Debug, Clone, Serialize)]
struct TestEmailRequest<'a> {
    email: &'a str,
}

/// Asks the service to send a test email.
pub async fn send_test_email(client: &ApiClient, address: &str) -> Result<()> {
    const FALLBACK: &str = "Failed to send the test email.";
    let envelope: Envelope<serde_json::Value> = client
        .post_envelope(TEST_EMAIL_PATH, &TestEmailRequest { email: address }, FALLBACK)
        .await?;
    envelope.into_data(FALLBACK).map(|_| ())
}

/// Triggers a backup; resolves when the service reports completion.
pub async fn create_backup(client: &ApiClient) -> Result<()> {
    const FALLBACK: &str = "Backup creation failed.";
    let body = serde_json::json!({});
    let envelope: Envelope<serde_json::Value> =
        client.post_envelope(BACKUP_PATH, &body, FALLBACK).await?;
    envelope.into_data(FALLBACK).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;

    #[test]
    fn user_row_parses_service_shape() {
        let body = r#"{
            "id": 3,
            "username": "bob",
            "email": "bob@example.com",
            "role": "User",
            "locked": true,
            "lockReason": "spam"
        }"#;
        let row: UserRow = serde_json::from_str(body).expect("parse");
        assert_eq!(row.role, Role::User);
        assert!(row.locked);
        assert_eq!(row.lock_reason.as_deref(), Some("spam"));
    }

    #[test]
    fn booking_row_parses_times_and_status() {
        let body = r#"{
            "id": 12,
            "roomName": "Blue Room",
            "roomLocation": "HQ",
            "username": "alice",
            "userEmail": "alice@example.com",
            "startTime": "2026-08-06T09:00:00",
            "endTime": "2026-08-06T10:30:00",
            "status": "APPROVED",
            "reason": null,
            "createdAt": "2026-08-01T12:00:00"
        }"#;
        let row: BookingRow = serde_json::from_str(body).expect("parse");
        assert_eq!(row.status, BookingStatus::Approved);
        assert!(row.end_time > row.start_time);
        assert_eq!(row.room_location.as_deref(), Some("HQ"));
    }

    #[test]
    fn lock_action_verbs() {
        assert_eq!(LockAction::Lock.as_str(), "lock");
        assert_eq!(LockAction::Unlock.past_tense(), "unlocked");
    }

    #[test]
    fn settings_sections_have_distinct_paths_and_copy() {
        let sections = [
            SettingsSection::General,
            SettingsSection::Reservation,
            SettingsSection::Admin,
            SettingsSection::Email,
            SettingsSection::AutoBackup,
        ];
        for (i, a) in sections.iter().enumerate() {
            for b in sections.iter().skip(i + 1) {
                assert_ne!(a.as_str(), b.as_str());
                assert_ne!(a.saved_message(), b.saved_message());
            }
        }
    }
}
