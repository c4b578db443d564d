// SPDX-License-Identifier: MPL-2.0
//! `roomdesk` is a desktop client for a meeting-room booking service,
//! built with the Iced GUI framework.
//!
//! It covers the service's authentication flows (login with captcha,
//! registration and password reset with emailed verification codes) and
//! its administration pages (rooms, users, bookings, service settings),
//! and provides the transient-feedback core the whole client is wired
//! through: dismissible banners, auto-expiring toasts, and the
//! flag-parameter protocol that carries one-shot result messages across
//! navigations.

pub mod api;
pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod nav;
pub mod session;
pub mod ui;
pub mod validate;
