// SPDX-License-Identifier: MPL-2.0
//! Inline dismissible banner.
//!
//! A banner occupies a named region inside the page content. Each region
//! holds at most one banner; showing a new one replaces the old. Banners
//! auto-dismiss after a fixed delay through the same path a manual close
//! takes.

use super::severity::Severity;
use super::Message;
use crate::ui::styles::spacing;
use iced::widget::{button, container, text, Row};
use iced::{alignment, Border, Color, Element, Length, Theme};
use std::time::{Duration, Instant};

/// Fixed display time before a banner dismisses itself.
pub const AUTO_DISMISS: Duration = Duration::from_millis(5000);

/// A single rendered banner instance.
#[derive(Debug, Clone)]
pub struct Banner {
    severity: Severity,
    text: String,
    shown_at: Instant,
}

impl Banner {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn age(&self) -> Duration {
        self.shown_at.elapsed()
    }

    /// Whether the fixed auto-dismiss delay has elapsed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.age() >= AUTO_DISMISS
    }

    #[cfg(test)]
    pub(crate) fn backdate(&mut self, by: Duration) {
        self.shown_at -= by;
    }
}

/// Renders a banner for the given region.
///
/// The close button routes through [`Message::DismissBanner`], the same
/// path the auto-dismiss timer uses.
pub fn view<'a>(region: &str, banner: &'a Banner) -> Element<'a, Message> {
    let accent = banner.severity.accent();

    let body = text(banner.text.as_str()).size(15);

    let close = button(text("\u{2715}").size(12))
        .on_press(Message::DismissBanner(region.to_owned()))
        .padding(spacing::XS)
        .style(button::text);

    let content = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(container(body).width(Length::Fill))
        .push(close);

    container(content)
        .width(Length::Fill)
        .padding(spacing::SM)
        .style(move |theme: &Theme| banner_style(theme, accent))
        .into()
}

fn banner_style(theme: &Theme, accent: Color) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color { a: 0.12, ..accent })),
        border: Border {
            color: accent,
            width: 1.0,
            radius: 4.0.into(),
        },
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_banner_is_not_expired() {
        let banner = Banner::new(Severity::Success, "Room added");
        assert!(!banner.is_expired());
    }

    #[test]
    fn backdated_banner_expires() {
        let mut banner = Banner::new(Severity::Danger, "Failed to add room");
        banner.backdate(AUTO_DISMISS);
        assert!(banner.is_expired());
    }

    #[test]
    fn view_builds_for_every_severity() {
        for severity in [
            Severity::Success,
            Severity::Danger,
            Severity::Warning,
            Severity::Info,
            Severity::Light,
        ] {
            let banner = Banner::new(severity, "message");
            let _ = view("alert", &banner);
        }
    }
}
