// SPDX-License-Identifier: MPL-2.0
//! User interface components, Elm-style: state down, messages up.
//!
//! - [`feedback`] - banners, toasts, and the severity model they share
//! - [`screens`] - one module per service page
//! - [`styles`] - shared palette, spacing and container styles

pub mod feedback;
pub mod screens;
pub mod styles;
