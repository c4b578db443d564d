// SPDX-License-Identifier: MPL-2.0
//! One module per service page.
//!
//! Each screen owns its `State` and `Message`, an `update` that applies
//! a message and answers with an [`Action`](login::Action)-style enum
//! (run a task, navigate, or hand an outcome to the app shell), and a
//! `view`. Transient per-page state - countdown timers, busy flags, the
//! row an action is running against - lives in these states and is torn
//! down with them on navigation.

pub mod bookings;
pub mod forgot_password;
pub mod login;
pub mod register;
pub mod rooms;
pub mod settings;
pub mod users;
