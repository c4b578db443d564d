// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::nav::Route;
use crate::ui::feedback;
use crate::ui::screens::{
    bookings, forgot_password, login, register, rooms, settings, users,
};
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// screen messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Login(login::Message),
    Register(register::Message),
    ForgotPassword(forgot_password::Message),
    Rooms(rooms::Message),
    Users(users::Message),
    Bookings(bookings::Message),
    Settings(settings::Message),
    Feedback(feedback::Message),
    /// Navigate to a route (new history entry).
    Navigate(Route),
    /// Sign out and return to the login screen.
    Logout,
    /// Periodic tick driving feedback auto-dismiss.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional service base URL override (`--server`).
    pub server: Option<String>,
    /// Optional starting route (e.g. `/admin/rooms?success-add`).
    pub start_route: Option<String>,
    /// Optional data directory override (`--data-dir`).
    pub data_dir: Option<String>,
    /// Optional config directory override (`--config-dir`).
    pub config_dir: Option<String>,
}
