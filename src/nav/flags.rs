// SPDX-License-Identifier: MPL-2.0
//! One-shot result messages carried as route flags.
//!
//! After a form post, the service redirects to the origin page with a
//! presence-only flag parameter (`?success-add`, `?error-delete`) naming
//! the outcome. On arrival, [`consume`] shows the matching message once
//! and rewrites the current history entry with every known flag
//! stripped - matched or not - so a stale flag can never resurface from
//! the address the user is left on.

use super::history::History;
use crate::ui::feedback::{Presenter, Severity};

/// One flag-to-message mapping.
#[derive(Debug, Clone)]
pub struct MessageSpec {
    key: String,
    text: String,
    severity: Severity,
}

impl MessageSpec {
    pub fn new(key: impl Into<String>, text: impl Into<String>, severity: Severity) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            severity,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }
}

/// An ordered flag table. Keys are unique; declaring a key twice
/// updates the original entry in place, keeping its position, so match
/// priority stays with the first declaration.
#[derive(Debug, Clone, Default)]
pub struct MessageTable {
    entries: Vec<MessageSpec>,
}

impl MessageTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(
        mut self,
        key: impl Into<String>,
        text: impl Into<String>,
        severity: Severity,
    ) -> Self {
        let spec = MessageSpec::new(key, text, severity);
        match self.entries.iter_mut().find(|e| e.key == spec.key) {
            Some(existing) => *existing = spec,
            None => self.entries.push(spec),
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageSpec> {
        self.entries.iter()
    }

    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Checks the current route for known flags and shows at most one
/// message - the first table entry whose key is present, in table order.
///
/// If a message was shown, the current history entry is replaced (not
/// pushed) by the same route with *every* table key removed; other query
/// parameters keep their relative order and the fragment survives. If
/// nothing matched, neither the presenter nor the history is touched.
/// Returns whether a message was shown; running again on the cleaned
/// route is a no-op.
pub fn consume(history: &mut History, table: &MessageTable, presenter: &mut Presenter) -> bool {
    let matched = table
        .iter()
        .find(|spec| history.current().has_param(spec.key()));

    let Some(spec) = matched else {
        return false;
    };

    presenter.show_banner(spec.text(), spec.severity());

    let cleaned = history.current().without_params(&table.keys());
    history.replace(cleaned);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::Route;
    use crate::ui::feedback::DEFAULT_REGION;

    fn rooms_table() -> MessageTable {
        MessageTable::new()
            .with("success-add", "Room added", Severity::Success)
            .with("success-delete", "Room deleted", Severity::Success)
            .with("error-add", "Failed to add room", Severity::Danger)
    }

    #[test]
    fn shows_message_and_cleans_route() {
        let mut history = History::new(Route::parse("/rooms?success-add&location=HQ").unwrap());
        let mut presenter = Presenter::new();

        let shown = consume(&mut history, &rooms_table(), &mut presenter);

        assert!(shown);
        let banner = presenter.banner(DEFAULT_REGION).expect("banner shown");
        assert_eq!(banner.text(), "Room added");
        assert_eq!(banner.severity(), Severity::Success);
        assert_eq!(history.current().to_string(), "/rooms?location=HQ");
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn first_table_entry_wins_when_several_flags_present() {
        // Flag order in the URL does not matter; table order does.
        let mut history =
            History::new(Route::parse("/rooms?error-add&success-add").unwrap());
        let mut presenter = Presenter::new();

        consume(&mut history, &rooms_table(), &mut presenter);

        let banner = presenter.banner(DEFAULT_REGION).expect("banner shown");
        assert_eq!(banner.text(), "Room added");
    }

    #[test]
    fn cleanup_strips_every_table_key_not_just_the_match() {
        let mut history =
            History::new(Route::parse("/rooms?success-add&error-add&floor=2").unwrap());
        let mut presenter = Presenter::new();

        consume(&mut history, &rooms_table(), &mut presenter);

        assert_eq!(history.current().to_string(), "/rooms?floor=2");
    }

    #[test]
    fn no_match_touches_nothing() {
        let mut history = History::new(Route::parse("/rooms?location=HQ").unwrap());
        let mut presenter = Presenter::new();

        let shown = consume(&mut history, &rooms_table(), &mut presenter);

        assert!(!shown);
        assert!(presenter.banner(DEFAULT_REGION).is_none());
        assert_eq!(history.current().to_string(), "/rooms?location=HQ");
    }

    #[test]
    fn second_consume_is_a_no_op() {
        let mut history = History::new(Route::parse("/rooms?success-delete").unwrap());
        let mut presenter = Presenter::new();

        assert!(consume(&mut history, &rooms_table(), &mut presenter));
        presenter.dismiss_banner(DEFAULT_REGION);

        assert!(!consume(&mut history, &rooms_table(), &mut presenter));
        assert!(presenter.banner(DEFAULT_REGION).is_none());
    }

    #[test]
    fn fragment_and_unrelated_params_survive_cleanup() {
        let mut history =
            History::new(Route::parse("/rooms?name=blue&success-add&floor=2#list").unwrap());
        let mut presenter = Presenter::new();

        consume(&mut history, &rooms_table(), &mut presenter);

        assert_eq!(history.current().to_string(), "/rooms?name=blue&floor=2#list");
    }

    #[test]
    fn duplicate_table_key_updates_in_place() {
        let table = MessageTable::new()
            .with("success-add", "first wording", Severity::Success)
            .with("error-add", "failed", Severity::Danger)
            .with("success-add", "second wording", Severity::Info);

        assert_eq!(table.len(), 2);
        assert_eq!(table.keys(), vec!["success-add", "error-add"]);

        let mut history = History::new(Route::parse("/rooms?success-add").unwrap());
        let mut presenter = Presenter::new();
        consume(&mut history, &table, &mut presenter);

        let banner = presenter.banner(DEFAULT_REGION).expect("banner shown");
        assert_eq!(banner.text(), "second wording");
        assert_eq!(banner.severity(), Severity::Info);
    }

    #[test]
    fn empty_table_never_matches() {
        let mut history = History::new(Route::parse("/rooms?success-add").unwrap());
        let mut presenter = Presenter::new();

        assert!(!consume(&mut history, &MessageTable::new(), &mut presenter));
        assert!(history.current().has_param("success-add"));
    }
}
