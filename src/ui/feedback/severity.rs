// SPDX-License-Identifier: MPL-2.0
//! Feedback severity levels.

use crate::ui::styles::palette;
use iced::Color;

/// Visual/semantic category of a feedback message.
///
/// This is the single source of truth for severity styling: both the
/// banner and the toast renderers consult the same accent and contrast
/// rules, so the two can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Operation completed (green).
    #[default]
    Success,
    /// Operation failed (red).
    Danger,
    /// Needs attention but nothing is broken (amber).
    Warning,
    /// Neutral information (cyan).
    Info,
    /// Low-emphasis note (near-white).
    Light,
}

impl Severity {
    /// Returns the accent/background color for this severity.
    #[must_use]
    pub fn accent(&self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS,
            Severity::Danger => palette::DANGER,
            Severity::Warning => palette::WARNING,
            Severity::Info => palette::INFO,
            Severity::Light => palette::LIGHT,
        }
    }

    /// Whether text drawn over the accent color needs to be dark.
    ///
    /// `Warning`, `Info` and `Light` are bright backgrounds; everything
    /// else takes light text.
    #[must_use]
    pub fn uses_dark_text(&self) -> bool {
        matches!(self, Severity::Warning | Severity::Info | Severity::Light)
    }

    /// Returns the text color that contrasts with [`Self::accent`].
    #[must_use]
    pub fn text_color(&self) -> Color {
        if self.uses_dark_text() {
            palette::GRAY_900
        } else {
            palette::WHITE
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Danger => "danger",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Light => "light",
        }
    }
}
