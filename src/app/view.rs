// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Composes the navigation bar, the shared banner region, the current
//! screen, and the floating toast overlay.

use super::{App, Message, ScreenState};
use crate::nav::Route;
use crate::ui::feedback::{self, DEFAULT_REGION};
use crate::ui::screens::{bookings, forgot_password, login, register, rooms, settings, users};
use crate::ui::styles::spacing;
use iced::widget::{button, container, text, Column, Row, Stack};
use iced::{alignment, Element, Length};

/// Renders the current application view.
pub fn view(app: &App) -> Element<'_, Message> {
    let screen: Element<'_, Message> = match &app.screen {
        ScreenState::Login(state) => login::view(state).map(Message::Login),
        ScreenState::Register(state) => register::view(state).map(Message::Register),
        ScreenState::ForgotPassword(state) => {
            forgot_password::view(state).map(Message::ForgotPassword)
        }
        ScreenState::UserDashboard => view_user_dashboard(app),
        ScreenState::AdminDashboard => view_admin_dashboard(app),
        ScreenState::Rooms(state) => rooms::view(state).map(Message::Rooms),
        ScreenState::Users(state) => users::view(state).map(Message::Users),
        ScreenState::Bookings(state) => bookings::view(state).map(Message::Bookings),
        ScreenState::Settings(state) => settings::view(state).map(Message::Settings),
    };

    let mut layout = Column::new();

    if app.screen.screen().requires_auth() && app.session.is_authenticated() {
        layout = layout.push(navbar(app));
    }

    // The shared banner region sits above the screen content, like the
    // alert container at the top of every page.
    if let Some(banner) = app.feedback.region_view(DEFAULT_REGION) {
        layout = layout.push(
            container(banner.map(Message::Feedback))
                .width(Length::Fill)
                .padding([spacing::SM, spacing::MD]),
        );
    }

    layout = layout.push(
        container(screen)
            .width(Length::Fill)
            .height(Length::Fill),
    );

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(layout.width(Length::Fill).height(Length::Fill))
        .push(feedback::view_overlay(&app.feedback).map(Message::Feedback))
        .into()
}

fn nav_link(label: &str, target: &str, current: bool) -> Element<'static, Message> {
    let mut link = button(text(label.to_owned()).size(14)).padding([spacing::XS, spacing::SM]);
    link = if current {
        link.style(button::primary)
    } else {
        link.style(button::text)
    };
    if !current {
        link = link.on_press(Message::Navigate(Route::new(target.to_owned())));
    }
    link.into()
}

fn navbar(app: &App) -> Element<'_, Message> {
    let current = app.history.current().path().to_string();
    let mut links = Row::new().spacing(spacing::XS);

    if app.session.is_admin() {
        for (label, target) in [
            ("Dashboard", "/admin"),
            ("Rooms", "/admin/rooms"),
            ("Users", "/admin/users"),
            ("Bookings", "/admin/bookings"),
            ("Settings", "/admin/settings"),
        ] {
            links = links.push(nav_link(label, target, current == target));
        }
    } else {
        links = links.push(nav_link("Dashboard", "/user/dashboard", current == "/user/dashboard"));
    }

    let username = app
        .session
        .profile
        .as_ref()
        .map(|profile| profile.username.clone())
        .unwrap_or_default();

    let logout = button(text("Log out").size(14))
        .on_press(Message::Logout)
        .padding([spacing::XS, spacing::SM])
        .style(button::secondary);

    container(
        Row::new()
            .spacing(spacing::MD)
            .align_y(alignment::Vertical::Center)
            .push(text("RoomDesk").size(18))
            .push(links)
            .push(container(text(username).size(13)).width(Length::Fill).align_x(alignment::Horizontal::Right))
            .push(logout),
    )
    .width(Length::Fill)
    .padding([spacing::SM, spacing::MD])
    .into()
}

fn view_admin_dashboard(app: &App) -> Element<'_, Message> {
    let username = app
        .session
        .profile
        .as_ref()
        .map(|profile| profile.username.as_str())
        .unwrap_or("administrator");

    container(
        Column::new()
            .spacing(spacing::MD)
            .push(text(format!("Welcome back, {username}.")).size(24))
            .push(
                text("Manage rooms, user accounts, bookings and service settings from the bar above.")
                    .size(15),
            ),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .padding(spacing::LG)
    .into()
}

fn view_user_dashboard(app: &App) -> Element<'_, Message> {
    let username = app
        .session
        .profile
        .as_ref()
        .map(|profile| profile.username.as_str())
        .unwrap_or("there");

    container(
        Column::new()
            .spacing(spacing::MD)
            .push(text(format!("Hello, {username}.")).size(24))
            .push(text("Your meeting-room bookings live on the booking site.").size(15)),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .padding(spacing::LG)
    .into()
}
