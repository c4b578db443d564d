// SPDX-License-Identifier: MPL-2.0
//! Transient user feedback.
//!
//! Two presentation modes share one severity model:
//!
//! - [`Banner`] - inline, single-slot, anchored to a named region inside
//!   page content, fixed 5 s auto-dismiss.
//! - [`Toast`] - floating, stacking, per-instance delay (3 s default).
//!
//! The [`Presenter`] owns every live instance and is the only component
//! allowed to remove one. Auto-dismiss and manual dismissal run through
//! the same removal paths, so timers firing after a manual close are
//! harmless no-ops. Usage errors (an unregistered banner region) are
//! recorded as diagnostics instead of reaching the caller: feedback must
//! never take down the screen it decorates.

mod banner;
mod severity;
mod toast;

pub use banner::{Banner, AUTO_DISMISS};
pub use severity::Severity;
pub use toast::{view_overlay, Corner, Toast, ToastId, DEFAULT_DELAY};

use crate::diagnostics::{EventKind, Handle as DiagnosticsHandle};
use std::collections::HashMap;

/// Region the app shell registers at startup; `show_banner` targets it.
pub const DEFAULT_REGION: &str = "alert";

/// Messages for feedback state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// Close the banner currently occupying a region.
    DismissBanner(String),
    /// Close a specific toast.
    DismissToast(ToastId),
    /// Advance auto-dismiss timers.
    Tick,
}

/// Owns banner regions and the toast stack.
#[derive(Debug, Default)]
pub struct Presenter {
    regions: HashMap<String, Option<Banner>>,
    toasts: Vec<Toast>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Presenter {
    /// Creates a presenter with the default banner region registered.
    #[must_use]
    pub fn new() -> Self {
        let mut presenter = Self::default();
        presenter.register_region(DEFAULT_REGION);
        presenter
    }

    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Registers a banner region. Idempotent; an already-registered
    /// region keeps whatever banner it is showing.
    pub fn register_region(&mut self, region: impl Into<String>) {
        self.regions.entry(region.into()).or_insert(None);
    }

    /// Drops a region and any banner it holds. Screens release their
    /// extra regions on navigation; the default region stays for the
    /// lifetime of the app.
    pub fn release_region(&mut self, region: &str) {
        self.regions.remove(region);
    }

    /// Shows a banner in the default region.
    pub fn show_banner(&mut self, text: impl Into<String>, severity: Severity) {
        self.show_banner_in(DEFAULT_REGION, text, severity);
    }

    /// Shows a banner in a named region, replacing any banner already
    /// there. An unregistered region records a diagnostic and changes
    /// nothing.
    pub fn show_banner_in(
        &mut self,
        region: &str,
        text: impl Into<String>,
        severity: Severity,
    ) {
        match self.regions.get_mut(region) {
            Some(slot) => {
                *slot = Some(Banner::new(severity, text));
            }
            None => {
                if let Some(diagnostics) = &self.diagnostics {
                    diagnostics.record(
                        EventKind::UnknownRegion,
                        format!("banner region {region:?} not found"),
                    );
                }
            }
        }
    }

    /// Removes the banner from a region, if any. Safe to call for a
    /// region that is empty or unknown (a timer may fire after a manual
    /// close).
    pub fn dismiss_banner(&mut self, region: &str) {
        if let Some(slot) = self.regions.get_mut(region) {
            *slot = None;
        }
    }

    /// Adds a toast and returns its id. Existing toasts are untouched.
    pub fn show_toast(&mut self, toast: Toast) -> ToastId {
        let id = toast.id();
        self.toasts.push(toast);
        id
    }

    /// Removes a toast by id. Returns whether it was still present;
    /// dismissing an already-gone toast is a safe no-op.
    pub fn dismiss_toast(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id() != id);
        self.toasts.len() != before
    }

    /// Advances every auto-dismiss timer, removing expired instances
    /// through the same paths manual dismissal uses.
    pub fn tick(&mut self) {
        let expired_regions: Vec<String> = self
            .regions
            .iter()
            .filter_map(|(region, slot)| match slot {
                Some(banner) if banner.is_expired() => Some(region.clone()),
                _ => None,
            })
            .collect();
        for region in expired_regions {
            self.dismiss_banner(&region);
        }

        let expired_toasts: Vec<ToastId> = self
            .toasts
            .iter()
            .filter(|toast| toast.is_expired())
            .map(Toast::id)
            .collect();
        for id in expired_toasts {
            self.dismiss_toast(id);
        }
    }

    /// Handles a feedback message.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::DismissBanner(region) => self.dismiss_banner(region),
            Message::DismissToast(id) => {
                self.dismiss_toast(*id);
            }
            Message::Tick => self.tick(),
        }
    }

    /// The banner a region currently shows, if any.
    #[must_use]
    pub fn banner(&self, region: &str) -> Option<&Banner> {
        self.regions.get(region).and_then(Option::as_ref)
    }

    /// Live toasts in insertion order.
    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    #[must_use]
    pub fn toast_count(&self) -> usize {
        self.toasts.len()
    }

    /// Whether any instance is live (drives the tick subscription).
    #[must_use]
    pub fn has_live_instances(&self) -> bool {
        !self.toasts.is_empty() || self.regions.values().any(Option::is_some)
    }

    /// Renders the banner for a region, if one is showing.
    pub fn region_view(&self, region: &str) -> Option<iced::Element<'_, Message>> {
        self.banner(region).map(|b| banner::view(region, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics;
    use std::time::Duration;

    #[test]
    fn new_presenter_has_default_region_and_nothing_live() {
        let presenter = Presenter::new();
        assert!(presenter.banner(DEFAULT_REGION).is_none());
        assert!(!presenter.has_live_instances());
    }

    #[test]
    fn second_banner_replaces_the_first() {
        let mut presenter = Presenter::new();
        presenter.show_banner("first", Severity::Success);
        presenter.show_banner("second", Severity::Danger);

        let banner = presenter.banner(DEFAULT_REGION).expect("banner shown");
        assert_eq!(banner.text(), "second");
        assert_eq!(banner.severity(), Severity::Danger);
    }

    #[test]
    fn unknown_region_is_a_logged_no_op() {
        let diagnostics = diagnostics::Handle::new();
        let mut presenter = Presenter::new();
        presenter.set_diagnostics(diagnostics.clone());

        presenter.show_banner_in("doesNotExist", "lost", Severity::Info);

        assert!(presenter.banner(DEFAULT_REGION).is_none());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.snapshot()[0].kind, EventKind::UnknownRegion);
    }

    #[test]
    fn registered_extra_region_accepts_banners() {
        let mut presenter = Presenter::new();
        presenter.register_region("sidebar");
        presenter.show_banner_in("sidebar", "note", Severity::Light);

        assert!(presenter.banner("sidebar").is_some());
        assert!(presenter.banner(DEFAULT_REGION).is_none());
    }

    #[test]
    fn released_region_rejects_banners() {
        let diagnostics = diagnostics::Handle::new();
        let mut presenter = Presenter::new();
        presenter.set_diagnostics(diagnostics.clone());
        presenter.register_region("sidebar");
        presenter.release_region("sidebar");

        presenter.show_banner_in("sidebar", "late", Severity::Info);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn dismissing_empty_or_unknown_region_is_safe() {
        let mut presenter = Presenter::new();
        presenter.dismiss_banner(DEFAULT_REGION);
        presenter.dismiss_banner("neverRegistered");
    }

    #[test]
    fn banner_tick_dismisses_only_expired() {
        let mut presenter = Presenter::new();
        presenter.show_banner("stays", Severity::Success);
        presenter.tick();
        assert!(presenter.banner(DEFAULT_REGION).is_some());

        // Age the banner past its fixed delay; the next tick must take
        // the same removal path as the close button.
        if let Some(slot) = presenter.regions.get_mut(DEFAULT_REGION) {
            if let Some(banner) = slot.as_mut() {
                banner.backdate(AUTO_DISMISS);
            }
        }
        presenter.tick();
        assert!(presenter.banner(DEFAULT_REGION).is_none());
    }

    #[test]
    fn toasts_accumulate_and_expire_independently() {
        let mut presenter = Presenter::new();
        let keep = presenter.show_toast(Toast::new("keep"));
        let _gone = presenter.show_toast(Toast::new("gone").delay(Duration::ZERO));
        assert_eq!(presenter.toast_count(), 2);

        presenter.tick();

        assert_eq!(presenter.toast_count(), 1);
        assert_eq!(presenter.toasts().next().unwrap().id(), keep);
    }

    #[test]
    fn later_toast_never_clears_an_earlier_one() {
        let mut presenter = Presenter::new();
        let first = presenter.show_toast(Toast::new("first"));
        presenter.show_toast(Toast::new("second"));
        presenter.show_toast(Toast::new("third").severity(Severity::Warning));

        assert_eq!(presenter.toast_count(), 3);
        assert_eq!(presenter.toasts().next().unwrap().id(), first);
    }

    #[test]
    fn dismissing_a_gone_toast_is_a_no_op() {
        let mut presenter = Presenter::new();
        let id = presenter.show_toast(Toast::new("once"));
        assert!(presenter.dismiss_toast(id));
        assert!(!presenter.dismiss_toast(id));
    }

    #[test]
    fn handle_message_routes_dismissals() {
        let mut presenter = Presenter::new();
        presenter.show_banner("to close", Severity::Info);
        let id = presenter.show_toast(Toast::new("to close"));

        presenter.handle_message(&Message::DismissBanner(DEFAULT_REGION.to_owned()));
        presenter.handle_message(&Message::DismissToast(id));

        assert!(!presenter.has_live_instances());
    }

    #[test]
    fn overlay_builds_with_mixed_corners() {
        let mut presenter = Presenter::new();
        presenter.show_toast(Toast::new("a"));
        presenter.show_toast(Toast::new("b").corner(Corner::TopStart));
        let _ = view_overlay(&presenter);
    }
}
