// SPDX-License-Identifier: MPL-2.0
//! Floating auto-expiring toast.
//!
//! Toasts stack in a screen corner, each with its own delay. Later
//! toasts never displace earlier ones; every toast leaves only through
//! its own expiry or its own close button.

use super::severity::Severity;
use super::{Message, Presenter};
use crate::ui::styles::{spacing, TOAST_WIDTH};
use iced::widget::{button, container, text, Column, Row, Stack};
use iced::{alignment, Border, Element, Length, Theme};
use std::time::{Duration, Instant};

/// Auto-hide delay used when the caller does not pick one.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(3000);

/// Unique identifier for a toast.
///
/// Drawn from a process-wide counter so two toasts created in the same
/// tick can never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

impl ToastId {
    fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Screen corner a toast stack is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Corner {
    #[default]
    BottomEnd,
    BottomStart,
    TopEnd,
    TopStart,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::BottomEnd,
        Corner::BottomStart,
        Corner::TopEnd,
        Corner::TopStart,
    ];
}

/// One floating toast instance.
#[derive(Debug, Clone)]
pub struct Toast {
    id: ToastId,
    severity: Severity,
    text: String,
    delay: Duration,
    corner: Corner,
    shown_at: Instant,
}

impl Toast {
    /// Creates a success toast with the default delay, anchored bottom-end.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ToastId::next(),
            severity: Severity::Success,
            text: text.into(),
            delay: DEFAULT_DELAY,
            corner: Corner::default(),
            shown_at: Instant::now(),
        }
    }

    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn corner(mut self, corner: Corner) -> Self {
        self.corner = corner;
        self
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn severity_level(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn text_body(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn delay_duration(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub fn anchor(&self) -> Corner {
        self.corner
    }

    #[must_use]
    pub fn age(&self) -> Duration {
        self.shown_at.elapsed()
    }

    /// Whether this toast's own delay has elapsed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.age() >= self.delay
    }

    #[cfg(test)]
    pub(crate) fn backdate(&mut self, by: Duration) {
        self.shown_at -= by;
    }
}

/// Renders one toast card.
fn view(toast: &Toast) -> Element<'_, Message> {
    let accent = toast.severity.accent();
    let text_color = toast.severity.text_color();

    let body = text(toast.text.as_str())
        .size(15)
        .style(move |_theme: &Theme| text::Style {
            color: Some(text_color),
        });

    let close = button(text("\u{2715}").size(12).style(move |_theme: &Theme| {
        text::Style {
            color: Some(text_color),
        }
    }))
    .on_press(Message::DismissToast(toast.id))
    .padding(spacing::XS)
    .style(button::text);

    let content = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(container(body).width(Length::Fill))
        .push(close);

    container(content)
        .width(Length::Fixed(TOAST_WIDTH))
        .padding(spacing::SM)
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(accent)),
            border: Border {
                radius: 6.0.into(),
                ..Border::default()
            },
            text_color: Some(text_color),
            ..Default::default()
        })
        .into()
}

/// Renders the floating toast overlay, one stacked layer per corner
/// that currently holds toasts. Meant to be stacked above the screen
/// content by the app shell.
pub fn view_overlay(presenter: &Presenter) -> Element<'_, Message> {
    let mut layers = Stack::new().width(Length::Fill).height(Length::Fill);

    for corner in Corner::ALL {
        let toasts: Vec<Element<'_, Message>> = presenter
            .toasts()
            .filter(|toast| toast.anchor() == corner)
            .map(view)
            .collect();

        if toasts.is_empty() {
            continue;
        }

        let (align_x, align_y) = match corner {
            Corner::BottomEnd => (alignment::Horizontal::Right, alignment::Vertical::Bottom),
            Corner::BottomStart => (alignment::Horizontal::Left, alignment::Vertical::Bottom),
            Corner::TopEnd => (alignment::Horizontal::Right, alignment::Vertical::Top),
            Corner::TopStart => (alignment::Horizontal::Left, alignment::Vertical::Top),
        };

        let column = Column::with_children(toasts).spacing(spacing::XS);

        layers = layers.push(
            container(column)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(align_x)
                .align_y(align_y)
                .padding(spacing::MD),
        );
    }

    layers.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_ids_are_unique() {
        let a = Toast::new("one");
        let b = Toast::new("two");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn defaults_match_the_documented_contract() {
        let toast = Toast::new("Saved");
        assert_eq!(toast.severity_level(), Severity::Success);
        assert_eq!(toast.delay_duration(), DEFAULT_DELAY);
        assert_eq!(toast.anchor(), Corner::BottomEnd);
    }

    #[test]
    fn warning_toast_uses_dark_text_and_default_delay() {
        let toast = Toast::new("Saved").severity(Severity::Warning);
        assert!(toast.severity_level().uses_dark_text());
        assert_eq!(toast.delay_duration(), DEFAULT_DELAY);
    }

    #[test]
    fn zero_delay_toast_is_immediately_expired() {
        let toast = Toast::new("gone").delay(Duration::ZERO);
        assert!(toast.is_expired());
    }

    #[test]
    fn fresh_toast_is_not_expired() {
        let toast = Toast::new("still here");
        assert!(!toast.is_expired());
    }
}
