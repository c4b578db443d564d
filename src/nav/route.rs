// SPDX-License-Identifier: MPL-2.0
//! Route value type.
//!
//! A route is a server-relative navigation target: path, ordered query
//! pairs, optional fragment. Query pairs may be valueless - a bare key
//! whose mere presence carries meaning (a *flag parameter*). Parsing and
//! formatting round-trip the relative order of pairs, so removing some
//! keys never reshuffles the rest.

use crate::error::{Error, Result};
use std::fmt;

/// One query pair. `value` is `None` for flag-style parameters
/// (`?success-add`) and `Some` for ordinary ones (`?location=HQ`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPair {
    pub key: String,
    pub value: Option<String>,
}

/// A parsed navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    path: String,
    query: Vec<QueryPair>,
    fragment: Option<String>,
}

impl Route {
    /// A route with no query and no fragment.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
            fragment: None,
        }
    }

    /// Parses a route from a string.
    ///
    /// Accepts server-relative targets (`/rooms?floor=2#list`) as well as
    /// absolute URLs (as found in a redirect `Location` header), whose
    /// scheme and authority are dropped.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::Route("empty route".into()));
        }

        // Strip `scheme://authority` if present.
        let relative = match input.find("://") {
            Some(scheme_end) => {
                let after_authority = &input[scheme_end + 3..];
                match after_authority.find(['/', '?', '#']) {
                    Some(idx) => &after_authority[idx..],
                    None => "/",
                }
            }
            None => input,
        };

        let (before_fragment, fragment) = match relative.split_once('#') {
            Some((head, frag)) => (head, Some(frag.to_string())),
            None => (relative, None),
        };

        let (path, raw_query) = match before_fragment.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (before_fragment, None),
        };

        if !path.starts_with('/') {
            return Err(Error::Route(format!("route path must be absolute: {input:?}")));
        }

        let mut query = Vec::new();
        if let Some(raw_query) = raw_query {
            for piece in raw_query.split('&').filter(|p| !p.is_empty()) {
                let pair = match piece.split_once('=') {
                    Some((key, value)) => QueryPair {
                        key: decode(key)?,
                        value: Some(decode(value)?),
                    },
                    None => QueryPair {
                        key: decode(piece)?,
                        value: None,
                    },
                };
                query.push(pair);
            }
        }

        Ok(Self {
            path: path.to_string(),
            query,
            fragment,
        })
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    #[must_use]
    pub fn query(&self) -> &[QueryPair] {
        &self.query
    }

    /// Whether the query contains `key`, with or without a value.
    #[must_use]
    pub fn has_param(&self, key: &str) -> bool {
        self.query.iter().any(|pair| pair.key == key)
    }

    /// The first value recorded for `key`, if any.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|pair| pair.key == key)
            .and_then(|pair| pair.value.as_deref())
    }

    /// Appends a `key=value` pair.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push(QueryPair {
            key: key.into(),
            value: Some(value.into()),
        });
        self
    }

    /// Appends a valueless flag parameter.
    #[must_use]
    pub fn with_flag(mut self, key: impl Into<String>) -> Self {
        self.query.push(QueryPair {
            key: key.into(),
            value: None,
        });
        self
    }

    /// Returns a copy with every pair whose key is in `keys` removed.
    /// Pairs outside `keys` keep their relative order; path and fragment
    /// are untouched.
    #[must_use]
    pub fn without_params(&self, keys: &[&str]) -> Self {
        Self {
            path: self.path.clone(),
            query: self
                .query
                .iter()
                .filter(|pair| !keys.contains(&pair.key.as_str()))
                .cloned()
                .collect(),
            fragment: self.fragment.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        for (i, pair) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            match &pair.value {
                Some(value) => write!(
                    f,
                    "{sep}{}={}",
                    urlencoding::encode(&pair.key),
                    urlencoding::encode(value)
                )?,
                None => write!(f, "{sep}{}", urlencoding::encode(&pair.key))?,
            }
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

fn decode(raw: &str) -> Result<String> {
    urlencoding::decode(raw)
        .map(|cow| cow.into_owned())
        .map_err(|e| Error::Route(format!("bad percent-encoding in {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_valueless_flags_and_pair_order() {
        let route = Route::parse("/rooms?success-add&location=HQ").unwrap();
        assert_eq!(route.path(), "/rooms");
        assert!(route.has_param("success-add"));
        assert_eq!(route.param("success-add"), None);
        assert_eq!(route.param("location"), Some("HQ"));
        assert_eq!(route.query()[0].key, "success-add");
        assert_eq!(route.query()[1].key, "location");
    }

    #[test]
    fn display_round_trips() {
        for input in [
            "/rooms",
            "/rooms?success-add",
            "/rooms?success-add&location=HQ",
            "/rooms?location=HQ#top",
            "/admin/users?page=2&sort=name",
        ] {
            let route = Route::parse(input).unwrap();
            assert_eq!(route.to_string(), input);
        }
    }

    #[test]
    fn parse_strips_scheme_and_authority() {
        let route = Route::parse("https://rooms.example.com/admin/rooms?success-add").unwrap();
        assert_eq!(route.path(), "/admin/rooms");
        assert!(route.has_param("success-add"));

        let bare = Route::parse("https://rooms.example.com").unwrap();
        assert_eq!(bare.path(), "/");
    }

    #[test]
    fn parse_rejects_relative_paths_and_empty_input() {
        assert!(Route::parse("rooms?x=1").is_err());
        assert!(Route::parse("").is_err());
        assert!(Route::parse("   ").is_err());
    }

    #[test]
    fn values_are_percent_decoded_and_re_encoded() {
        let route = Route::parse("/rooms?name=Blue%20Room").unwrap();
        assert_eq!(route.param("name"), Some("Blue Room"));
        assert_eq!(route.to_string(), "/rooms?name=Blue%20Room");
    }

    #[test]
    fn without_params_removes_only_named_keys() {
        let route = Route::parse("/rooms?success-add&location=HQ&error-add&floor=2").unwrap();
        let cleaned = route.without_params(&["success-add", "error-add", "success-delete"]);

        assert_eq!(cleaned.to_string(), "/rooms?location=HQ&floor=2");
        // The original is untouched.
        assert!(route.has_param("success-add"));
    }

    #[test]
    fn without_params_preserves_fragment_and_path() {
        let route = Route::parse("/rooms?success-add#bookings").unwrap();
        let cleaned = route.without_params(&["success-add"]);
        assert_eq!(cleaned.path(), "/rooms");
        assert_eq!(cleaned.fragment(), Some("bookings"));
        assert_eq!(cleaned.to_string(), "/rooms#bookings");
    }

    #[test]
    fn builders_append_in_order() {
        let route = Route::new("/rooms")
            .with_param("name", "blue")
            .with_flag("success-add")
            .with_param("floor", "2");
        assert_eq!(route.to_string(), "/rooms?name=blue&success-add&floor=2");
    }

    #[test]
    fn empty_query_pieces_are_ignored() {
        let route = Route::parse("/rooms?&&location=HQ&").unwrap();
        assert_eq!(route.query().len(), 1);
        assert_eq!(route.param("location"), Some("HQ"));
    }
}
