// SPDX-License-Identifier: MPL-2.0
//! Shared styling constants and helpers.
//!
//! A trimmed-down token set: base palette, spacing scale, and the
//! container/button styles the screens share.

use iced::{Border, Color, Shadow, Theme};

pub mod palette {
    use super::Color;

    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.13, 0.15, 0.16);
    pub const GRAY_600: Color = Color::from_rgb(0.42, 0.46, 0.49);
    pub const GRAY_200: Color = Color::from_rgb(0.88, 0.89, 0.90);

    // Semantic colors for feedback severities.
    pub const SUCCESS: Color = Color::from_rgb(0.098, 0.529, 0.329);
    pub const DANGER: Color = Color::from_rgb(0.863, 0.208, 0.271);
    pub const WARNING: Color = Color::from_rgb(1.0, 0.757, 0.027);
    pub const INFO: Color = Color::from_rgb(0.051, 0.792, 0.941);
    pub const LIGHT: Color = Color::from_rgb(0.973, 0.976, 0.980);
}

pub mod spacing {
    pub const XS: f32 = 4.0;
    pub const SM: f32 = 8.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
}

/// Width reserved for feedback toasts.
pub const TOAST_WIDTH: f32 = 340.0;

/// Width of the centered form column used by the auth screens.
pub const FORM_WIDTH: f32 = 420.0;

/// A subtle card around grouped form content.
pub fn card(theme: &Theme) -> iced::widget::container::Style {
    let base = theme.extended_palette().background.base;
    iced::widget::container::Style {
        background: Some(iced::Background::Color(base.color)),
        border: Border {
            color: palette::GRAY_200,
            width: 1.0,
            radius: 6.0.into(),
        },
        shadow: Shadow::default(),
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semantic_colors_are_distinct() {
        let colors = [
            palette::SUCCESS,
            palette::DANGER,
            palette::WARNING,
            palette::INFO,
            palette::LIGHT,
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
